//! # Interaction Engine
//!
//! A small entity/component runtime for placed 3-D objects, with a
//! trigger-driven interaction state machine and a checklist tracker layered
//! on top.
//!
//! ## Features
//!
//! - **Components by type**: at most one component per type on an entity,
//!   looked up by type and persisted through a registry of type keys
//! - **One-shot interactions**: a player standing in a trigger volume presses
//!   the interact action and the object's feedback queue plays back once
//! - **Checklists**: ordered lines crossed off by interactions
//! - **Scenes**: whole-world snapshots saved as JSON or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use interaction_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let toilet = engine.world.create_entity("ToiletModel");
//!         engine.world.insert(toilet, InteractionController::new())
//!             .map_err(|e| AppError::Setup(e.to_string()))?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         engine.quit();
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = MyApp;
//!     Engine::run(InteractionConfig::default(), &mut app, 1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, InteractionConfig},
        ecs::components::{
            ActivationReport, ChecklistTracker, Completion, FeedbackAction, InteractionController,
            InteractionState, ObjectiveScreen, RenderComponent, SkinCollection, TransformKind,
            TransformOp, TriggerVolume,
        },
        ecs::{Component, ComponentRegistry, ComponentType, Entity, EntityId, World},
        foundation::{
            math::{Transform, Vec3},
            MaterialHandle, MeshHandle,
        },
        input::{ActionInput, InputManager, KeyCode, LogicalAction},
        physics::{BodyKind, BodyRef, PhysicsBridge, TriggerEvent, TriggerFlags},
        scene::SceneDocument,
        AppError, AppEvent, Application, Engine, EngineError,
    };
}
