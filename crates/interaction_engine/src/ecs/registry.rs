//! Component Registry
//!
//! Maps a stable type key to a zero-argument constructor and a deserializer so
//! that entities can attach, persist and restore components without knowing
//! the concrete types. Built once at startup and shared by every world.

use std::collections::HashMap;

use super::component::{Component, ComponentType, PersistedComponent, PersistedData};
use super::{EcsError, Entity};
use crate::ecs::components::{
    ChecklistTracker, InteractionController, ObjectiveScreen, RenderComponent, SkinCollection,
    TriggerVolume,
};

/// Builds a default instance of a component type
pub type Constructor = Box<dyn Fn() -> Box<dyn Component> + Send + Sync>;

/// Rebuilds a component from its persisted form
pub type Deserializer =
    Box<dyn Fn(&PersistedData) -> Result<Box<dyn Component>, serde_json::Error> + Send + Sync>;

struct Registration {
    key: &'static str,
    construct: Constructor,
    deserialize: Deserializer,
}

/// Outcome of [`ComponentRegistry::deserialize_all`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeserializeReport {
    /// Type keys attached, in order
    pub attached: Vec<String>,
    /// Type keys skipped (unknown, malformed or already present)
    pub skipped: Vec<String>,
}

impl DeserializeReport {
    /// True when every entry was attached
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Registry of component constructors and deserializers keyed by type key
#[derive(Default)]
pub struct ComponentRegistry {
    entries: HashMap<&'static str, Registration>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in component type registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_type::<RenderComponent>();
        registry.register_type::<TriggerVolume>();
        registry.register_type::<InteractionController>();
        registry.register_type::<ChecklistTracker>();
        registry.register_type::<SkinCollection>();
        registry.register_type::<ObjectiveScreen>();
        registry
    }

    /// Register a constructor and deserializer under a type key.
    ///
    /// Re-registering a key replaces the previous entry (last writer wins) and
    /// returns `true`.
    pub fn register(
        &mut self,
        type_key: &'static str,
        construct: Constructor,
        deserialize: Deserializer,
    ) -> bool {
        let replaced = self
            .entries
            .insert(type_key, Registration { key: type_key, construct, deserialize })
            .is_some();
        if replaced {
            log::warn!("Component type '{}' registered twice; the later registration wins", type_key);
        } else {
            log::debug!("Registered component type '{}'", type_key);
        }
        replaced
    }

    /// Register a serde-backed component type
    pub fn register_type<T: ComponentType>(&mut self) -> bool {
        self.register(
            T::TYPE_KEY,
            Box::new(|| -> Box<dyn Component> { Box::new(T::default()) }),
            Box::new(|data: &PersistedData| -> Result<Box<dyn Component>, serde_json::Error> {
                let component: T = serde_json::from_value(data.clone())?;
                Ok(Box::new(component))
            }),
        )
    }

    /// Whether a type key is registered
    pub fn is_registered(&self, type_key: &str) -> bool {
        self.entries.contains_key(type_key)
    }

    /// Registered type keys, sorted
    pub fn type_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.entries.values().map(|r| r.key).collect();
        keys.sort_unstable();
        keys
    }

    /// Construct a default instance by type key
    pub fn construct(&self, type_key: &str) -> Result<Box<dyn Component>, EcsError> {
        let registration = self
            .entries
            .get(type_key)
            .ok_or_else(|| EcsError::Unregistered(type_key.to_string()))?;
        Ok((registration.construct)())
    }

    /// Attach a `T` built by its registered constructor.
    ///
    /// If the entity already holds a `T`, nothing is constructed and the
    /// existing instance is returned.
    pub fn attach<'e, T: ComponentType>(&self, entity: &'e mut Entity) -> Result<&'e mut T, EcsError> {
        if entity.has::<T>() {
            log::warn!(
                "Entity '{}' already has a {}; attach returns the existing instance",
                entity.name(),
                T::TYPE_KEY
            );
            return entity.get_mut::<T>().ok_or(EcsError::CheckedOut(T::TYPE_KEY));
        }

        let component = self.construct(T::TYPE_KEY)?;
        if !(*component).as_any().is::<T>() {
            return Err(EcsError::TypeMismatch(T::TYPE_KEY));
        }
        entity.insert_boxed(T::TYPE_KEY, component);
        entity.get_mut::<T>().ok_or(EcsError::CheckedOut(T::TYPE_KEY))
    }

    /// Persist every attached component, in attach order
    pub fn serialize_all(&self, entity: &Entity) -> Result<Vec<PersistedComponent>, EcsError> {
        entity
            .components()
            .map(|(key, component)| {
                let data = component
                    .to_persisted()
                    .map_err(|source| EcsError::Serialization { key: key.to_string(), source })?;
                Ok(PersistedComponent { type_key: key.to_string(), data })
            })
            .collect()
    }

    /// Rebuild and attach components from persisted entries.
    ///
    /// Unknown type keys (data written by a newer build), malformed data and
    /// types the entity already holds are reported and skipped; the rest are
    /// still attached.
    pub fn deserialize_all(&self, entity: &mut Entity, entries: &[PersistedComponent]) -> DeserializeReport {
        let mut report = DeserializeReport::default();

        for entry in entries {
            let Some(registration) = self.entries.get(entry.type_key.as_str()) else {
                log::warn!(
                    "Skipping unknown component type '{}' on entity '{}'",
                    entry.type_key,
                    entity.name()
                );
                report.skipped.push(entry.type_key.clone());
                continue;
            };

            let component = match (registration.deserialize)(&entry.data) {
                Ok(component) => component,
                Err(err) => {
                    log::warn!(
                        "Skipping malformed '{}' on entity '{}': {}",
                        entry.type_key,
                        entity.name(),
                        err
                    );
                    report.skipped.push(entry.type_key.clone());
                    continue;
                }
            };

            if entity.insert_boxed(registration.key, component) {
                report.attached.push(entry.type_key.clone());
            } else {
                log::warn!(
                    "Entity '{}' already has a {}; persisted duplicate skipped",
                    entity.name(),
                    entry.type_key
                );
                report.skipped.push(entry.type_key.clone());
            }
        }

        report
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.type_keys())
            .finish()
    }
}
