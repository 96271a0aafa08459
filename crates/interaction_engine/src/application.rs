//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::input::KeyCode;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with the engine's tick loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first tick. Build the scene and register
    /// physics bodies here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Called before every tick. Feed input events and physics notifications here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time step of the coming tick in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Handle application events
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        engine.handle_event(event);
        Ok(())
    }

    /// Called once when the loop stops
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Scene setup error
    #[error("Scene setup error: {0}")]
    Setup(String),
}

/// Application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },
    /// Stop the loop
    CloseRequested,
}
