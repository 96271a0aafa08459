//! ECS World implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use super::component::{Component, ComponentType, Context, PersistedComponent, UpdateContext};
use super::components::TriggerVolume;
use super::registry::{ComponentRegistry, DeserializeReport};
use super::{EcsError, Entity, EntityId};
use crate::foundation::Transform;
use crate::input::ActionInput;
use crate::physics::TriggerEvent;

/// ECS World containing all entities and their components
///
/// Entities are stored by id; since ids are assigned in creation order,
/// iteration order is scene-registration order.
#[derive(Debug)]
pub struct World {
    next_entity_id: u32,
    entities: BTreeMap<EntityId, Entity>,
    registry: Arc<ComponentRegistry>,
}

impl World {
    /// Create a new world with the built-in component registry
    pub fn new() -> Self {
        Self::with_registry(Arc::new(ComponentRegistry::with_builtin()))
    }

    /// Create a world sharing an existing registry
    pub fn with_registry(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            next_entity_id: 0,
            entities: BTreeMap::new(),
            registry,
        }
    }

    /// Component registry used by this world
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Create a new entity
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId::from_raw(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        self.entities.insert(id, Entity::new(id, name));
        id
    }

    /// Create an entity with a specific id (scene restore).
    ///
    /// Fails if the id is taken or leaves no room for a following id.
    pub(crate) fn create_entity_with_id(&mut self, id: EntityId, name: impl Into<String>) -> Result<EntityId, EcsError> {
        if self.entities.contains_key(&id) {
            return Err(EcsError::IdTaken(id));
        }
        let next = id.raw().checked_add(1).ok_or(EcsError::IdOutOfRange(id))?;
        self.next_entity_id = self.next_entity_id.max(next);
        self.entities.insert(id, Entity::new(id, name));
        Ok(id)
    }

    /// Destroy an entity and its components.
    ///
    /// Children are unlinked, not destroyed; destruction is scene-driven.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.entities.remove(&id) else {
            return false;
        };
        if let Some(parent) = entity.parent() {
            if let Some(parent) = self.entities.get_mut(&parent) {
                parent.remove_child(id);
            }
        }
        for child in entity.children() {
            if let Some(child) = self.entities.get_mut(child) {
                child.set_parent(None);
            }
        }
        entity.detach_all();
        log::debug!("Destroyed entity '{}' ({})", entity.name(), id);
        true
    }

    /// Whether an entity exists
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Borrow an entity
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutably borrow an entity
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterate entities in registration order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Ids in registration order
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// First entity (in registration order) with the given name
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .values()
            .find(|e| e.name() == name)
            .map(Entity::id)
    }

    /// Borrow an entity's transform
    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.entities.get(&id).map(|e| &e.transform)
    }

    /// Mutably borrow an entity's transform
    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.entities.get_mut(&id).map(|e| &mut e.transform)
    }

    /// Parent `child` under `parent`, detaching it from any previous parent
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), EcsError> {
        if parent == child {
            return Err(EcsError::SelfParent(child));
        }
        if !self.contains(parent) {
            return Err(EcsError::NoSuchEntity(parent));
        }
        let previous = self
            .entities
            .get(&child)
            .ok_or(EcsError::NoSuchEntity(child))?
            .parent();

        if let Some(previous) = previous {
            if let Some(previous) = self.entities.get_mut(&previous) {
                previous.remove_child(child);
            }
        }
        if let Some(entity) = self.entities.get_mut(&child) {
            entity.set_parent(Some(parent));
        }
        if let Some(entity) = self.entities.get_mut(&parent) {
            entity.push_child(child);
        }
        Ok(())
    }

    /// Attach a registry-constructed `T` to an entity (no-op if already present)
    pub fn attach<T: ComponentType>(&mut self, id: EntityId) -> Result<&mut T, EcsError> {
        let entity = self.entities.get_mut(&id).ok_or(EcsError::NoSuchEntity(id))?;
        self.registry.attach::<T>(entity)
    }

    /// Attach a pre-built `T` to an entity (existing instance wins)
    pub fn insert<T: ComponentType>(&mut self, id: EntityId, component: T) -> Result<&mut T, EcsError> {
        self.entities
            .get_mut(&id)
            .ok_or(EcsError::NoSuchEntity(id))?
            .insert(component)
    }

    /// Get an entity's `T`
    pub fn get<T: ComponentType>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(&id)?.get::<T>()
    }

    /// Get an entity's `T` mutably
    pub fn get_mut<T: ComponentType>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(&id)?.get_mut::<T>()
    }

    /// Detach and return an entity's `T`
    pub fn detach<T: ComponentType>(&mut self, id: EntityId) -> Option<T> {
        self.entities.get_mut(&id)?.detach::<T>()
    }

    /// Persist an entity's component set
    pub fn serialize_components(&self, id: EntityId) -> Result<Vec<PersistedComponent>, EcsError> {
        let entity = self.entities.get(&id).ok_or(EcsError::NoSuchEntity(id))?;
        self.registry.serialize_all(entity)
    }

    /// Restore persisted components onto an entity
    pub fn deserialize_components(
        &mut self,
        id: EntityId,
        entries: &[PersistedComponent],
    ) -> Result<DeserializeReport, EcsError> {
        let registry = Arc::clone(&self.registry);
        let entity = self.entities.get_mut(&id).ok_or(EcsError::NoSuchEntity(id))?;
        Ok(registry.deserialize_all(entity, entries))
    }

    /// Run every component's `awake` hook once, in registration order
    pub fn awake(&mut self) {
        for id in self.entity_ids() {
            for key in self.component_keys(id) {
                self.with_checked_out(id, key, |component, world| {
                    component.awake(&mut Context { world, owner: id });
                });
            }
        }
    }

    /// Gameplay phase of a tick: update every component in registration order
    pub fn update(&mut self, delta_time: f32, input: &dyn ActionInput) {
        for id in self.entity_ids() {
            for key in self.component_keys(id) {
                self.with_checked_out(id, key, |component, world| {
                    let mut ctx = UpdateContext {
                        world,
                        owner: id,
                        input,
                        delta_time,
                    };
                    component.update(&mut ctx);
                });
            }
        }
    }

    /// Deliver a trigger notification to the components of `id` that handle triggers.
    ///
    /// A [`TriggerVolume`] on the entity filters by body kind. Returns the
    /// number of components notified.
    pub fn notify_trigger(&mut self, id: EntityId, event: TriggerEvent) -> usize {
        let Some(entity) = self.entities.get(&id) else {
            log::warn!("Trigger notification for missing entity {}", id);
            return 0;
        };
        if let Some(volume) = entity.get::<TriggerVolume>() {
            if !volume.accepts(event.body().kind()) {
                log::trace!(
                    "Trigger on '{}' ignored {:?} body",
                    entity.name(),
                    event.body().kind()
                );
                return 0;
            }
        }

        let mut notified = 0;
        for key in self.component_keys(id) {
            let handled = self.with_checked_out(id, key, |component, world| {
                if component.handles_triggers() {
                    component.on_trigger(event, &mut Context { world, owner: id });
                    true
                } else {
                    false
                }
            });
            if handled == Some(true) {
                notified += 1;
            }
        }
        notified
    }

    /// Run `f` on an entity's `T` while it is checked out, with the rest of the world available
    pub fn with_component<T: ComponentType, R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut T, &mut World) -> R,
    ) -> Option<R> {
        self.with_checked_out(id, T::TYPE_KEY, |component, world| {
            component.as_any_mut().downcast_mut::<T>().map(|typed| f(typed, world))
        })
        .flatten()
    }

    fn component_keys(&self, id: EntityId) -> Vec<&'static str> {
        self.entities
            .get(&id)
            .map(Entity::component_keys)
            .unwrap_or_default()
    }

    /// Take a component out of its entity, run `f` with full world access, put it back.
    fn with_checked_out<R>(
        &mut self,
        id: EntityId,
        key: &'static str,
        f: impl FnOnce(&mut dyn Component, &mut World) -> R,
    ) -> Option<R> {
        let mut component = self.entities.get_mut(&id)?.components.checkout(key)?;
        let result = f(component.as_mut(), self);

        let leftover = match self.entities.get_mut(&id) {
            Some(entity) => entity.components.checkin(key, component),
            None => Some(component),
        };
        if let Some(mut orphan) = leftover {
            log::debug!("Component '{}' of {} was removed during its own call", key, id);
            orphan.on_detach();
        }
        Some(result)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
