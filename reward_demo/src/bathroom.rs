//! The bathroom cleanup scene
//!
//! Three messes, each an interaction that crosses off one line of the floor
//! manager's checklist and rewards the player with a skin.

use interaction_engine::prelude::*;

use crate::DemoError;

/// Materials
pub mod materials {
    use interaction_engine::foundation::MaterialHandle;

    pub const BATHROOM: MaterialHandle = MaterialHandle(0);
    pub const DUCK: MaterialHandle = MaterialHandle(1);
    pub const TOILET: MaterialHandle = MaterialHandle(2);
    pub const TOILET_CLEAN: MaterialHandle = MaterialHandle(3);
    pub const SOAP: MaterialHandle = MaterialHandle(4);
    pub const SPILLED_SOAP: MaterialHandle = MaterialHandle(5);
    pub const CHECKLIST_LINE: MaterialHandle = MaterialHandle(6);
    pub const SKIN_DUCK: MaterialHandle = MaterialHandle(10);
    pub const SKIN_PORCELAIN: MaterialHandle = MaterialHandle(11);
    pub const SKIN_BUBBLES: MaterialHandle = MaterialHandle(12);
}

/// Meshes
pub mod meshes {
    use interaction_engine::foundation::MeshHandle;

    pub const BATHROOM: MeshHandle = MeshHandle(0);
    pub const DUCK: MeshHandle = MeshHandle(1);
    pub const FLAT_DUCK: MeshHandle = MeshHandle(2);
    pub const TOILET: MeshHandle = MeshHandle(3);
    pub const SOAP: MeshHandle = MeshHandle(4);
    pub const SPILLED: MeshHandle = MeshHandle(5);
    pub const LINE: MeshHandle = MeshHandle(6);
}

/// Entities the scripted player needs to find again
#[derive(Debug, Clone, Copy)]
pub struct Bathroom {
    pub player: EntityId,
    pub duck: EntityId,
    pub toilet: EntityId,
    pub spilled_soap: EntityId,
    pub floor_manager: EntityId,
    pub screen: EntityId,
}

fn prop(
    world: &mut World,
    name: &str,
    position: Vec3,
    mesh: MeshHandle,
    material: MaterialHandle,
) -> Result<EntityId, DemoError> {
    let id = world.create_entity(name);
    if let Some(entity) = world.entity_mut(id) {
        entity.set_position(position);
    }
    world.insert(id, RenderComponent::new().with_mesh(mesh).with_material(material))?;
    world.insert(id, TriggerVolume::new(TriggerFlags::STATICS | TriggerFlags::KINEMATICS))?;
    Ok(id)
}

/// Build the scene into the engine's world
pub fn build(engine: &mut Engine) -> Result<Bathroom, DemoError> {
    let capacity = engine.config().checklist_capacity;
    let hide_offset = engine.config().checklist_hide_offset;
    let checklist_name = engine.config().checklist_entity.clone();
    let screen_name = engine.config().objective_screen_entity.clone();
    let world = &mut engine.world;

    let bathroom = prop(world, "BathroomModel", Vec3::zeros(), meshes::BATHROOM, materials::BATHROOM)?;
    let duck = prop(world, "DuckModel", Vec3::new(4.0, -2.0, 0.0), meshes::DUCK, materials::DUCK)?;
    let flat_duck = prop(world, "FlatDuckModel", Vec3::new(-0.5, 0.0, 0.0), meshes::FLAT_DUCK, materials::DUCK)?;
    let toilet = prop(world, "ToiletModel", Vec3::new(-0.5, -1.0, 2.5), meshes::TOILET, materials::TOILET)?;
    let soap = prop(world, "SoapModel", Vec3::new(-3.2, -3.5, 4.72), meshes::SOAP, materials::SOAP)?;
    let spilled_soap = prop(
        world,
        "SpilledSoapModel",
        Vec3::new(-4.5, -0.2, 0.3),
        meshes::SPILLED,
        materials::SPILLED_SOAP,
    )?;
    for child in [duck, flat_duck, toilet, soap, spilled_soap] {
        world.add_child(bathroom, child)?;
    }

    let floor_manager = world.create_entity(checklist_name);
    let lines = ["Squish the duck", "Scrub the toilet", "Mop up the soap"]
        .iter()
        .enumerate()
        .map(|(i, label)| -> Result<EntityId, DemoError> {
            let line = world.create_entity(*label);
            if let Some(entity) = world.entity_mut(line) {
                entity.set_position(Vec3::new(-6.0, 3.0 - i as f32 * 0.5, 1.0));
            }
            world.insert(line, RenderComponent::new().with_mesh(meshes::LINE).with_material(materials::CHECKLIST_LINE))?;
            world.add_child(floor_manager, line)?;
            Ok(line)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let tracker = world.insert(floor_manager, ChecklistTracker::default().with_hide_offset(hide_offset))?;
    tracker.initialize(capacity);
    if let Err(err) = tracker.push(lines) {
        log::warn!("Checklist setup: {}", err);
    }

    let screen = world.create_entity(screen_name);
    world.insert(screen, ObjectiveScreen::default())?;

    let player = world.create_entity("Player");
    if let Some(entity) = world.entity_mut(player) {
        entity.set_position(Vec3::new(0.0, -4.5, 0.0));
    }
    world.insert(player, SkinCollection::default())?;

    world
        .insert(duck, InteractionController::new())?
        .set_reward(materials::SKIN_DUCK)
        .add_feedback(FeedbackAction::SwapMesh { target: duck, mesh: meshes::FLAT_DUCK })
        .add_feedback(FeedbackAction::SetTransform {
            target: duck,
            ops: vec![TransformOp::scale(Vec3::new(1.0, 1.0, 0.2))],
        })
        .add_feedback(FeedbackAction::MarkChecklist { index: 0 });

    world
        .insert(toilet, InteractionController::new())?
        .set_reward(materials::SKIN_PORCELAIN)
        .add_feedback(FeedbackAction::SwapMaterial { target: toilet, material: materials::TOILET_CLEAN })
        .add_feedback(FeedbackAction::MarkChecklist { index: 1 });

    world
        .insert(spilled_soap, InteractionController::new())?
        .set_reward(materials::SKIN_BUBBLES)
        .add_feedback(FeedbackAction::SetTransform {
            target: spilled_soap,
            ops: vec![
                TransformOp::position(Vec3::new(-4.5, -0.2, -50.0)),
                TransformOp::scale(Vec3::zeros()),
            ],
        })
        .add_feedback(FeedbackAction::SetTransform {
            target: soap,
            ops: vec![TransformOp::rotation(Vec3::new(0.0, 0.0, 90.0))],
        })
        .add_feedback(FeedbackAction::MarkChecklist { index: 2 });

    log::info!("Built bathroom scene with {} entities", world.len());
    Ok(Bathroom { player, duck, toilet, spilled_soap, floor_manager, screen })
}
