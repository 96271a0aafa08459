//! Core engine implementation

use std::path::Path;
use std::sync::Arc;

use crate::{
    application::{AppEvent, Application},
    config::{Config, ConfigError, InteractionConfig},
    ecs::{components::InteractionController, World},
    input::{InputManager, KeyCode},
    physics::PhysicsBridge,
    scene::{SceneDocument, SceneError},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the world and its collaborators and runs the tick: trigger
/// notifications first, then component updates, then input edge promotion.
#[derive(Debug)]
pub struct Engine {
    /// ECS world containing all entities and components
    pub world: World,

    /// Input handling system
    pub input: InputManager,

    /// Body registry and queued trigger notifications
    pub physics: PhysicsBridge,

    config: InteractionConfig,
    awake: bool,
    running: bool,
    frame: u64,
}

impl Engine {
    /// Create a new engine instance with an empty world
    pub fn new(config: InteractionConfig) -> Self {
        log::info!("Initializing engine...");
        Self::with_world(World::new(), config)
    }

    /// Create an engine around an existing world
    pub fn with_world(world: World, config: InteractionConfig) -> Self {
        Self {
            world,
            input: InputManager::with_bindings(config.bindings.clone()),
            physics: PhysicsBridge::new(),
            config,
            awake: false,
            running: true,
            frame: 0,
        }
    }

    /// Create an engine from a RON or TOML settings file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = InteractionConfig::load_from_file(path)?;
        Ok(Self::new(config))
    }

    /// Run the tick loop with the given application until it requests close
    pub fn run<T: Application>(config: InteractionConfig, app: &mut T, delta_time: f32) -> Result<(), EngineError> {
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;
        engine.awake();

        log::info!("Starting main loop...");

        while engine.running {
            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            if !engine.running {
                break;
            }
            engine.tick(delta_time);
        }

        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete after {} ticks", engine.frame);
        Ok(())
    }

    /// Bind interaction controllers to the configured well-known entities and
    /// run every component's `awake` hook. Runs once; later calls are ignored.
    pub fn awake(&mut self) {
        if self.awake {
            log::debug!("Engine already awake");
            return;
        }
        self.awake = true;

        let config = &self.config;
        for id in self.world.entity_ids() {
            self.world
                .with_component::<InteractionController, _>(id, |controller, world| {
                    controller.bind_well_known(world, config);
                });
        }
        self.world.awake();
    }

    /// Advance one tick
    pub fn tick(&mut self, delta_time: f32) {
        if !self.awake {
            self.awake();
        }
        self.physics.dispatch(&mut self.world);
        self.world.update(delta_time, &self.input);
        self.input.end_tick();
        self.frame += 1;
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::KeyInput { key, pressed } => self.handle_key_input(key, pressed),
            AppEvent::CloseRequested => self.quit(),
        }
    }

    /// Forward a raw key event to the input manager
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        self.input.handle_key_input(key, pressed);
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks completed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Engine configuration
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Save the current world as a scene document
    pub fn save_scene(&self, path: impl AsRef<Path>) -> Result<SceneDocument, EngineError> {
        let document = SceneDocument::capture(&self.world)?;
        document.save(path)?;
        Ok(document)
    }

    /// Replace the world with a saved scene.
    ///
    /// Registered bodies belong to the old world and are dropped; the new
    /// scene is awakened on the next tick.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let document = SceneDocument::load(path)?;
        self.world = document.restore(Arc::clone(self.world.registry()))?;
        self.physics = PhysicsBridge::new();
        self.awake = false;
        Ok(())
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene could not be saved or loaded
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
