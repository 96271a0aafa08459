//! End-to-end interaction scenarios driven through the engine tick

use approx::assert_relative_eq;
use interaction_engine::ecs::components::{checklist, interaction, ChecklistError, InteractionError};
use interaction_engine::prelude::*;

struct Room {
    engine: Engine,
    body: BodyRef,
    player: EntityId,
    sink: EntityId,
    lines: Vec<EntityId>,
}

fn room() -> Room {
    let mut engine = Engine::new(InteractionConfig::default());
    let world = &mut engine.world;

    let manager = world.create_entity("Floor Manager");
    let lines: Vec<_> = (0..3)
        .map(|i| {
            let line = world.create_entity(format!("Line {}", i));
            world.entity_mut(line).unwrap().set_position(Vec3::new(0.0, i as f32, 0.0));
            line
        })
        .collect();
    let tracker = world.insert(manager, ChecklistTracker::default()).unwrap();
    tracker.initialize(3);
    tracker.push(lines.iter().copied()).unwrap();

    let screen = world.create_entity("Screen");
    world.insert(screen, ObjectiveScreen::default()).unwrap();

    let player = world.create_entity("Player");
    world.insert(player, SkinCollection::default()).unwrap();

    let sink = world.create_entity("Sink");
    world.insert(sink, RenderComponent::new().with_material(MaterialHandle(1))).unwrap();
    world.insert(sink, TriggerVolume::new(TriggerFlags::KINEMATICS)).unwrap();
    world
        .insert(sink, InteractionController::new())
        .unwrap()
        .set_reward(MaterialHandle(77))
        .add_feedback(FeedbackAction::SwapMaterial { target: sink, material: MaterialHandle(2) })
        .add_feedback(FeedbackAction::SetTransform {
            target: sink,
            ops: vec![TransformOp::position(Vec3::new(3.0, 0.0, -1.0))],
        })
        .add_feedback(FeedbackAction::MarkChecklist { index: 1 });

    let body = engine.physics.register_body(player, BodyKind::Kinematic);
    engine.awake();
    Room { engine, body, player, sink, lines }
}

fn state(room: &Room) -> InteractionState {
    room.engine.world.get::<InteractionController>(room.sink).unwrap().state()
}

fn press(engine: &mut Engine) {
    engine.handle_key_input(KeyCode::E, true);
    engine.tick(0.016);
    engine.handle_key_input(KeyCode::E, false);
    engine.tick(0.016);
}

#[test]
fn entering_records_the_pending_body() {
    let mut room = room();
    assert_eq!(state(&room), InteractionState::Idle);

    room.engine.physics.enter(room.sink, room.body);
    room.engine.tick(0.016);

    let controller = room.engine.world.get::<InteractionController>(room.sink).unwrap();
    assert_eq!(controller.state(), InteractionState::PlayerPresent);
    assert_eq!(controller.pending_body(), Some(room.body));
}

#[test]
fn pressing_drains_the_queue_in_order() {
    let mut room = room();
    room.engine.physics.enter(room.sink, room.body);
    room.engine.tick(0.016);
    press(&mut room.engine);

    let world = &room.engine.world;
    assert_eq!(state(&room), InteractionState::Activated);
    assert_eq!(world.get::<RenderComponent>(room.sink).unwrap().material(), Some(MaterialHandle(2)));
    assert_relative_eq!(world.transform(room.sink).unwrap().position, Vec3::new(3.0, 0.0, -1.0));

    let manager = world.find_by_name("Floor Manager").unwrap();
    let tracker = world.get::<ChecklistTracker>(manager).unwrap();
    assert_eq!(tracker.completion_flags(), &[false, true, false]);
    assert_relative_eq!(world.transform(room.lines[1]).unwrap().position, Vec3::new(0.0, 1.0, -100.0));

    assert_eq!(world.get::<SkinCollection>(room.player).unwrap().skins(), &[MaterialHandle(77)]);
    let screen = world.find_by_name("Screen").unwrap();
    assert_eq!(world.get::<ObjectiveScreen>(screen).unwrap().objectives_achieved, 1);
}

#[test]
fn second_press_has_no_side_effects() {
    let mut room = room();
    room.engine.physics.enter(room.sink, room.body);
    room.engine.tick(0.016);
    press(&mut room.engine);

    let before = SceneDocument::capture(&room.engine.world).unwrap();

    room.engine.physics.leave(room.sink, room.body);
    room.engine.physics.enter(room.sink, room.body);
    room.engine.tick(0.016);
    press(&mut room.engine);
    assert_eq!(
        interaction::activate(&mut room.engine.world, room.sink),
        Err(InteractionError::AlreadyActivated)
    );

    assert_eq!(SceneDocument::capture(&room.engine.world).unwrap(), before);
    assert_relative_eq!(room.engine.world.transform(room.lines[1]).unwrap().position, Vec3::new(0.0, 1.0, -100.0));
}

#[test]
fn out_of_range_mark_leaves_flags_unchanged() {
    let mut world = World::new();
    let manager = world.create_entity("Floor Manager");
    let lines: Vec<_> = (0..3).map(|i| world.create_entity(format!("e{}", i))).collect();
    let tracker = world.insert(manager, ChecklistTracker::default()).unwrap();
    tracker.initialize(3);
    tracker.push(lines).unwrap();

    assert_eq!(
        checklist::mark_complete(&mut world, manager, 5),
        Err(ChecklistError::IndexOutOfRange { index: 5, capacity: 3 })
    );
    assert_eq!(
        world.get::<ChecklistTracker>(manager).unwrap().completion_flags(),
        &[false, false, false]
    );
}

#[test]
fn dynamic_bodies_are_filtered_out() {
    let mut room = room();
    let crate_body = room.engine.physics.register_body(room.player, BodyKind::Dynamic);
    room.engine.physics.enter(room.sink, crate_body);
    room.engine.tick(0.016);
    assert_eq!(state(&room), InteractionState::Idle);
}

#[test]
fn leaving_before_pressing_cancels() {
    let mut room = room();
    room.engine.physics.enter(room.sink, room.body);
    room.engine.physics.leave(room.sink, room.body);
    room.engine.handle_key_input(KeyCode::E, true);
    room.engine.tick(0.016);
    assert_eq!(state(&room), InteractionState::Idle);
}

#[test]
fn reloaded_scene_starts_fresh() {
    let mut room = room();
    room.engine.physics.enter(room.sink, room.body);
    room.engine.tick(0.016);
    press(&mut room.engine);

    let path = std::env::temp_dir().join(format!("interaction_engine_it_{}.json", std::process::id()));
    room.engine.save_scene(&path).unwrap();
    room.engine.load_scene(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(state(&room), InteractionState::Idle);
    let world = &room.engine.world;
    assert_eq!(world.get::<RenderComponent>(room.sink).unwrap().material(), Some(MaterialHandle(2)));
    assert_eq!(world.get::<SkinCollection>(room.player).unwrap().skins(), &[MaterialHandle(77)]);
}
