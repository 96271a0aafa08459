//! Scene documents
//!
//! A whole-scene snapshot: every entity with its id, name, transform, hierarchy
//! link and persisted components. Saved as JSON or RON depending on the file
//! extension.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ecs::{ComponentRegistry, EcsError, EntityId, PersistedComponent, World};
use crate::foundation::Transform;

/// Scene persistence errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode or decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON decode error
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON encode error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// Extension is neither `.json` nor `.ron`
    #[error("Unsupported scene format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Two records share an id
    #[error("Duplicate entity id {0} in scene")]
    DuplicateEntity(EntityId),

    /// ECS error
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

/// One entity in a scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity id
    pub id: EntityId,
    /// Entity name
    pub name: String,
    /// Local transform
    #[serde(default)]
    pub transform: Transform,
    /// Parent entity
    #[serde(default)]
    pub parent: Option<EntityId>,
    /// Children in sibling order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityId>,
    /// Persisted components in attach order
    #[serde(default)]
    pub components: Vec<PersistedComponent>,
}

/// Snapshot of every entity in a world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Entities in registration order
    pub entities: Vec<EntityRecord>,
}

enum Format {
    Json,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, SceneError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("ron") => Ok(Self::Ron),
            _ => Err(SceneError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl SceneDocument {
    /// Snapshot a world
    pub fn capture(world: &World) -> Result<Self, SceneError> {
        let entities = world
            .entities()
            .map(|entity| -> Result<EntityRecord, SceneError> {
                Ok(EntityRecord {
                    id: entity.id(),
                    name: entity.name().to_string(),
                    transform: entity.transform,
                    parent: entity.parent(),
                    children: entity.children().to_vec(),
                    components: world.serialize_components(entity.id())?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entities })
    }

    /// Rebuild a world, preserving ids, names, transforms, hierarchy and
    /// components. Unknown or malformed components are logged and skipped.
    pub fn restore(&self, registry: Arc<ComponentRegistry>) -> Result<World, SceneError> {
        let mut world = World::with_registry(registry);

        for record in &self.entities {
            let id = world
                .create_entity_with_id(record.id, record.name.clone())
                .map_err(|err| match err {
                    EcsError::IdTaken(id) => SceneError::DuplicateEntity(id),
                    other => SceneError::Ecs(other),
                })?;
            if let Some(transform) = world.transform_mut(id) {
                *transform = record.transform;
            }
        }

        for record in &self.entities {
            for &child in &record.children {
                if let Err(err) = world.add_child(record.id, child) {
                    log::warn!("Entity '{}' drops child {}: {}", record.name, child, err);
                }
            }
        }
        for record in &self.entities {
            let Some(parent) = record.parent else { continue };
            if world.entity(record.id).and_then(|e| e.parent()) == Some(parent) {
                continue;
            }
            if let Err(err) = world.add_child(parent, record.id) {
                log::warn!("Entity '{}' keeps no parent: {}", record.name, err);
            }
        }

        for record in &self.entities {
            let report = world.deserialize_components(record.id, &record.components)?;
            if !report.is_complete() {
                log::warn!(
                    "Entity '{}' restored without components {:?}",
                    record.name,
                    report.skipped
                );
            }
        }

        log::info!("Restored scene with {} entities", world.len());
        Ok(world)
    }

    /// Find a record by entity name
    pub fn find(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|record| record.name == name)
    }

    /// Write the document; `.json` or `.ron` by extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?,
        };
        std::fs::write(path, contents)?;
        log::info!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Read a document; `.json` or `.ron` by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let document = match format {
            Format::Json => serde_json::from_str(&contents)?,
            Format::Ron => ron::from_str(&contents)?,
        };
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentType;
    use crate::ecs::components::{ChecklistTracker, InteractionController, ObjectiveScreen, RenderComponent, SkinCollection};
    use crate::foundation::{MaterialHandle, MeshHandle, Vec3};
    use serde_json::json;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("interaction_engine_scene_{}_{}", std::process::id(), name))
    }

    fn bathroom() -> World {
        let mut world = World::new();
        let bathroom = world.create_entity("BathroomModel");
        world.insert(bathroom, RenderComponent::new().with_material(MaterialHandle(0)).with_mesh(MeshHandle(0))).unwrap();

        let duck = world.create_entity("DuckModel");
        world.entity_mut(duck).unwrap().set_position(Vec3::new(1.5, -2.0, 0.25));
        world.insert(duck, RenderComponent::new().with_material(MaterialHandle(1)).with_mesh(MeshHandle(1))).unwrap();
        world.insert(duck, InteractionController::new()).unwrap();
        world.add_child(bathroom, duck).unwrap();

        let manager = world.create_entity("Floor Manager");
        world.insert(manager, ChecklistTracker::default()).unwrap().initialize(3);

        let screen = world.create_entity("Screen");
        world.insert(screen, ObjectiveScreen { objectives_achieved: 2, active: true }).unwrap();

        let player = world.create_entity("Player");
        world.insert(player, SkinCollection::default()).unwrap().add_skin(MaterialHandle(9));
        world
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let world = bathroom();
        let document = SceneDocument::capture(&world).unwrap();
        let restored = document.restore(Arc::clone(world.registry())).unwrap();

        assert_eq!(SceneDocument::capture(&restored).unwrap(), document);
        let duck = restored.find_by_name("DuckModel").unwrap();
        assert_eq!(restored.entity(duck).unwrap().parent(), restored.find_by_name("BathroomModel"));
        assert_eq!(restored.get::<ObjectiveScreen>(restored.find_by_name("Screen").unwrap()).unwrap().objectives_achieved, 2);
    }

    #[test]
    fn test_restored_ids_continue_after_highest() {
        let document = SceneDocument::capture(&bathroom()).unwrap();
        let mut restored = document.restore(Arc::new(ComponentRegistry::with_builtin())).unwrap();
        let fresh = restored.create_entity("Late");
        assert!(document.entities.iter().all(|record| record.id < fresh));
    }

    #[test]
    fn test_runtime_state_persists_empty() {
        let document = SceneDocument::capture(&bathroom()).unwrap();
        let manager = document.find("Floor Manager").unwrap();
        assert_eq!(manager.components[0].data, json!({}));
        let duck = document.find("DuckModel").unwrap();
        assert_eq!(duck.components[1].type_key, InteractionController::TYPE_KEY);
        assert_eq!(duck.components[1].data, json!({}));
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = temp_path("scene.json");
        let document = SceneDocument::capture(&bathroom()).unwrap();
        document.save(&path).unwrap();
        let loaded = SceneDocument::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = temp_path("scene.ron");
        let document = SceneDocument::capture(&bathroom()).unwrap();
        document.save(&path).unwrap();
        let loaded = SceneDocument::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let restored = loaded.restore(Arc::new(ComponentRegistry::with_builtin())).unwrap();
        let player = restored.find_by_name("Player").unwrap();
        assert_eq!(restored.get::<SkinCollection>(player).unwrap().skins(), &[MaterialHandle(9)]);
        let duck = restored.find_by_name("DuckModel").unwrap();
        assert_eq!(restored.transform(duck).unwrap().position, Vec3::new(1.5, -2.0, 0.25));
    }

    #[test]
    fn test_unsupported_extension() {
        let document = SceneDocument::default();
        assert!(matches!(document.save(temp_path("scene.yaml")), Err(SceneError::UnsupportedFormat(_))));
        assert!(matches!(SceneDocument::load("scene.xml"), Err(SceneError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unknown_component_is_skipped_on_restore() {
        let document: SceneDocument = serde_json::from_value(json!({
            "entities": [
                { "id": 0, "name": "Fan", "components": [
                    { "type_key": "SpinBehaviour", "data": { "speed": 3 } },
                    { "type_key": "RenderComponent", "data": { "material": 2, "mesh": null, "visible": true } }
                ]}
            ]
        }))
        .unwrap();

        let world = document.restore(Arc::new(ComponentRegistry::with_builtin())).unwrap();
        let fan = world.find_by_name("Fan").unwrap();
        assert_eq!(world.entity(fan).unwrap().component_keys(), vec![RenderComponent::TYPE_KEY]);
    }

    #[test]
    fn test_sibling_order_survives_round_trip() {
        let mut world = World::new();
        let lights = world.create_entity("Lights");
        let first = world.create_entity("Light A");
        let second = world.create_entity("Light B");
        world.add_child(lights, second).unwrap();
        world.add_child(lights, first).unwrap();

        let path = temp_path("siblings.ron");
        SceneDocument::capture(&world).unwrap().save(&path).unwrap();
        let loaded = SceneDocument::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let restored = loaded.restore(Arc::new(ComponentRegistry::with_builtin())).unwrap();
        assert_eq!(restored.entity(lights).unwrap().children(), &[second, first]);
        assert_eq!(restored.entity(first).unwrap().parent(), Some(lights));
    }

    #[test]
    fn test_parent_only_records_still_link() {
        let document: SceneDocument = serde_json::from_value(json!({
            "entities": [
                { "id": 0, "name": "Room" },
                { "id": 1, "name": "Lamp", "parent": 0 }
            ]
        }))
        .unwrap();
        let world = document.restore(Arc::new(ComponentRegistry::with_builtin())).unwrap();
        assert_eq!(world.entity(EntityId::from_raw(0)).unwrap().children(), &[EntityId::from_raw(1)]);
    }

    #[test]
    fn test_top_of_range_id_is_rejected() {
        let document = SceneDocument {
            entities: vec![EntityRecord {
                id: EntityId::from_raw(u32::MAX),
                name: "Edge".into(),
                transform: Transform::default(),
                parent: None,
                children: Vec::new(),
                components: Vec::new(),
            }],
        };
        assert!(matches!(
            document.restore(Arc::new(ComponentRegistry::with_builtin())),
            Err(SceneError::Ecs(EcsError::IdOutOfRange(_)))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let record = EntityRecord {
            id: EntityId::from_raw(3),
            name: "Twin".into(),
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        };
        let document = SceneDocument { entities: vec![record.clone(), record] };
        assert!(matches!(
            document.restore(Arc::new(ComponentRegistry::with_builtin())),
            Err(SceneError::DuplicateEntity(_))
        ));
    }
}
