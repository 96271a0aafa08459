//! Bathroom cleanup demo
//!
//! Builds the bathroom scene, walks a scripted player through each mess,
//! presses the interact key at each one, saves the scene and prints what
//! changed.
//!
//! Usage: `reward_demo [settings.ron|settings.toml] [scene.json|scene.ron]`

mod bathroom;

use std::path::PathBuf;

use interaction_engine::config::ConfigError;
use interaction_engine::ecs::EcsError;
use interaction_engine::foundation::logging;
use interaction_engine::prelude::*;
use interaction_engine::scene::SceneError;
use thiserror::Error;

use bathroom::Bathroom;

/// Demo errors
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Scene setup failed: {0}")]
    Ecs(#[from] EcsError),

    #[error("Settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene file: {0}")]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// What the scripted player does on a given tick
#[derive(Debug, Clone, Copy)]
enum Step {
    Enter(Target),
    Leave(Target),
    Press,
    Release,
    Save,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Duck,
    Toilet,
    SpilledSoap,
}

const SCRIPT: &[(u64, Step)] = &[
    (1, Step::Enter(Target::Duck)),
    (2, Step::Press),
    (3, Step::Release),
    (4, Step::Leave(Target::Duck)),
    (5, Step::Enter(Target::Toilet)),
    (5, Step::Press),
    (6, Step::Release),
    (6, Step::Leave(Target::Toilet)),
    (7, Step::Enter(Target::SpilledSoap)),
    (8, Step::Press),
    (9, Step::Release),
    (9, Step::Leave(Target::SpilledSoap)),
    (10, Step::Enter(Target::Duck)),
    (10, Step::Press),
    (11, Step::Release),
    (12, Step::Save),
    (12, Step::Quit),
];

struct ScriptedPlayer {
    scene_path: PathBuf,
    scene: Option<Bathroom>,
    body: Option<BodyRef>,
}

impl ScriptedPlayer {
    fn new(scene_path: PathBuf) -> Self {
        Self {
            scene_path,
            scene: None,
            body: None,
        }
    }

    fn run_step(&self, engine: &mut Engine, scene: &Bathroom, body: BodyRef, step: Step) -> Result<(), AppError> {
        let target = |t: Target| match t {
            Target::Duck => scene.duck,
            Target::Toilet => scene.toilet,
            Target::SpilledSoap => scene.spilled_soap,
        };
        let interact = engine
            .input
            .bindings()
            .key_for(LogicalAction::Interact)
            .unwrap_or(KeyCode::E);

        match step {
            Step::Enter(t) => engine.physics.enter(target(t), body),
            Step::Leave(t) => engine.physics.leave(target(t), body),
            Step::Press => engine.handle_event(AppEvent::KeyInput { key: interact, pressed: true }),
            Step::Release => engine.handle_event(AppEvent::KeyInput { key: interact, pressed: false }),
            Step::Save => {
                engine.save_scene(&self.scene_path)?;
            }
            Step::Quit => engine.handle_event(AppEvent::CloseRequested),
        }
        Ok(())
    }
}

impl Application for ScriptedPlayer {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let scene = bathroom::build(engine).map_err(|e| AppError::Setup(e.to_string()))?;
        self.body = Some(engine.physics.register_body(scene.player, BodyKind::Kinematic));
        self.scene = Some(scene);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let (Some(scene), Some(body)) = (self.scene, self.body) else {
            return Err(AppError::Custom("update before initialize".to_string()));
        };
        let tick = engine.frame();
        for &(_, step) in SCRIPT.iter().filter(|(at, _)| *at == tick) {
            log::debug!("Tick {}: {:?}", tick, step);
            self.run_step(engine, &scene, body, step)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        if let Some(scene) = self.scene {
            report(engine, &scene);
        }
    }
}

fn report(engine: &Engine, scene: &Bathroom) {
    let world = &engine.world;

    println!("== Bathroom after {} ticks ==", engine.frame());
    for id in [scene.duck, scene.toilet, scene.spilled_soap] {
        let Some(entity) = world.entity(id) else { continue };
        let state = world
            .get::<InteractionController>(id)
            .map_or("no controller".to_string(), |c| format!("{:?}", c.state()));
        let render = world.get::<RenderComponent>(id);
        println!(
            "{:<18} {:<10} mesh={:<8} material={:<12} position={:?}",
            entity.name(),
            state,
            render.and_then(RenderComponent::mesh).map_or("-".to_string(), |m| m.to_string()),
            render.and_then(RenderComponent::material).map_or("-".to_string(), |m| m.to_string()),
            entity.transform.position.as_slice(),
        );
    }

    if let Some(checklist) = world.get::<ChecklistTracker>(scene.floor_manager) {
        println!(
            "Checklist: {}/{} complete {:?}",
            checklist.completed_count(),
            checklist.capacity(),
            checklist.completion_flags()
        );
    }
    if let Some(screen) = world.get::<ObjectiveScreen>(scene.screen) {
        println!("Screen: {} objectives, active={}", screen.objectives_achieved, screen.active);
    }
    if let Some(skins) = world.get::<SkinCollection>(scene.player) {
        let names: Vec<String> = skins.skins().iter().map(ToString::to_string).collect();
        println!("Player skins: {}", names.join(", "));
    }
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => InteractionConfig::load_from_file(path)?,
        None => InteractionConfig::default(),
    };
    let scene_path = args
        .next()
        .map_or_else(|| std::env::temp_dir().join("reward_demo_scene.json"), PathBuf::from);

    let mut app = ScriptedPlayer::new(scene_path.clone());
    Engine::run(config, &mut app, 1.0 / 60.0)?;

    let saved = SceneDocument::load(&scene_path)?;
    println!("Saved {} entities to {}", saved.entities.len(), scene_path.display());
    Ok(())
}

fn main() {
    logging::init_with_default("info");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
