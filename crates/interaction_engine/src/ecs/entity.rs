//! Entity implementation

use serde::{Deserialize, Serialize};

use super::component::{Component, ComponentType};
use super::EcsError;
use crate::foundation::{Transform, Vec3};

/// Entity identifier
///
/// Assigned in creation order and never reused within a world, so sorting by
/// id gives scene-registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Create an entity id from its raw value
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed object: identity, transform, hierarchy links and components
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    /// Local transform
    pub transform: Transform,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    pub(crate) components: ComponentSet,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            components: ComponentSet::default(),
        }
    }

    /// Get the entity id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent in the scene hierarchy
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: EntityId) {
        self.children.retain(|&c| c != child);
    }

    /// Set absolute position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Set absolute rotation (Euler degrees)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
    }

    /// Set absolute scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Get the held component of type `T`, if any. Never constructs.
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        self.components
            .get(T::TYPE_KEY)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Mutable variant of [`Entity::get`]
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(T::TYPE_KEY)
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Whether a component of type `T` is attached (including one checked out for update)
    pub fn has<T: ComponentType>(&self) -> bool {
        self.components.contains(T::TYPE_KEY)
    }

    /// Whether a component with the given type key is attached
    pub fn has_key(&self, type_key: &str) -> bool {
        self.components.contains(type_key)
    }

    /// Type keys of the attached components, in attach order
    pub fn component_keys(&self) -> Vec<&'static str> {
        self.components.keys()
    }

    /// Attach a pre-built component.
    ///
    /// If a `T` is already attached the new value is dropped and the existing
    /// instance is returned.
    pub fn insert<T: ComponentType>(&mut self, component: T) -> Result<&mut T, EcsError> {
        if self.components.is_checked_out(T::TYPE_KEY) {
            return Err(EcsError::CheckedOut(T::TYPE_KEY));
        }
        if !self.components.contains(T::TYPE_KEY) {
            self.insert_boxed(T::TYPE_KEY, Box::new(component));
        } else {
            log::warn!(
                "Entity '{}' already has a {}; keeping the existing instance",
                self.name,
                T::TYPE_KEY
            );
        }
        self.get_mut::<T>().ok_or(EcsError::CheckedOut(T::TYPE_KEY))
    }

    /// Attach a boxed component under a type key; returns false if the key is taken
    pub(crate) fn insert_boxed(&mut self, type_key: &'static str, mut component: Box<dyn Component>) -> bool {
        if self.components.contains(type_key) {
            return false;
        }
        component.on_attach(self.id);
        self.components.push(type_key, component);
        true
    }

    /// Detach and return the component of type `T`
    pub fn detach<T: ComponentType>(&mut self) -> Option<T> {
        let mut component = self.components.remove(T::TYPE_KEY)?;
        component.on_detach();
        component.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Iterate attached components (skips any currently checked out)
    pub fn components(&self) -> impl Iterator<Item = (&'static str, &dyn Component)> {
        self.components.iter()
    }

    pub(crate) fn detach_all(&mut self) {
        for (_, component) in self.components.iter_mut() {
            component.on_detach();
        }
        self.components = ComponentSet::default();
    }
}

#[derive(Debug)]
struct Slot {
    key: &'static str,
    component: Option<Box<dyn Component>>,
}

/// Ordered set of components keyed by type key, at most one per key.
///
/// A slot stays in place while its component is checked out, so attach order
/// is preserved across updates.
#[derive(Debug, Default)]
pub(crate) struct ComponentSet {
    slots: Vec<Slot>,
}

impl ComponentSet {
    fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.key == key)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.key == key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.slot(key).is_some()
    }

    pub(crate) fn is_checked_out(&self, key: &str) -> bool {
        self.slot(key).is_some_and(|s| s.component.is_none())
    }

    pub(crate) fn get(&self, key: &str) -> Option<&dyn Component> {
        self.slot(key)?.component.as_deref()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut (dyn Component + 'static)> {
        self.slot_mut(key)?.component.as_deref_mut()
    }

    pub(crate) fn keys(&self) -> Vec<&'static str> {
        self.slots.iter().map(|s| s.key).collect()
    }

    fn push(&mut self, key: &'static str, component: Box<dyn Component>) {
        self.slots.push(Slot { key, component: Some(component) });
    }

    fn remove(&mut self, key: &str) -> Option<Box<dyn Component>> {
        let index = self.slots.iter().position(|s| s.key == key)?;
        self.slots.remove(index).component
    }

    pub(crate) fn checkout(&mut self, key: &str) -> Option<Box<dyn Component>> {
        self.slot_mut(key)?.component.take()
    }

    /// Return a checked-out component. Hands it back if its slot was removed meanwhile.
    pub(crate) fn checkin(&mut self, key: &str, component: Box<dyn Component>) -> Option<Box<dyn Component>> {
        match self.slot_mut(key) {
            Some(slot) if slot.component.is_none() => {
                slot.component = Some(component);
                None
            }
            _ => Some(component),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &dyn Component)> {
        self.slots
            .iter()
            .filter_map(|s| s.component.as_deref().map(|c| (s.key, c)))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut Box<dyn Component>)> {
        self.slots
            .iter_mut()
            .filter_map(|s| s.component.as_mut().map(|c| (s.key, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{ObjectiveScreen, RenderComponent};
    use crate::foundation::MaterialHandle;

    #[test]
    fn test_insert_then_get() {
        let mut entity = Entity::new(EntityId::from_raw(1), "Screen");
        entity.insert(ObjectiveScreen::default()).unwrap();
        assert!(entity.has::<ObjectiveScreen>());
        assert!(entity.get::<RenderComponent>().is_none());
    }

    #[test]
    fn test_second_insert_keeps_original() {
        let mut entity = Entity::new(EntityId::from_raw(1), "Duck");
        entity
            .insert(RenderComponent::new().with_material(MaterialHandle(1)))
            .unwrap();
        let kept = entity
            .insert(RenderComponent::new().with_material(MaterialHandle(2)))
            .unwrap();
        assert_eq!(kept.material(), Some(MaterialHandle(1)));
        assert_eq!(entity.component_keys(), vec![RenderComponent::TYPE_KEY]);
    }

    #[test]
    fn test_detach_returns_typed_component() {
        let mut entity = Entity::new(EntityId::from_raw(1), "Screen");
        entity.insert(ObjectiveScreen { objectives_achieved: 2, active: true }).unwrap();
        let screen = entity.detach::<ObjectiveScreen>().unwrap();
        assert_eq!(screen.objectives_achieved, 2);
        assert!(!entity.has::<ObjectiveScreen>());
    }

    #[test]
    fn test_checked_out_slot_keeps_position() {
        let mut entity = Entity::new(EntityId::from_raw(1), "Duck");
        entity.insert(RenderComponent::new()).unwrap();
        entity.insert(ObjectiveScreen::default()).unwrap();

        let taken = entity.components.checkout(RenderComponent::TYPE_KEY).unwrap();
        assert!(entity.has::<RenderComponent>());
        assert!(entity.get::<RenderComponent>().is_none());
        assert!(entity.components.is_checked_out(RenderComponent::TYPE_KEY));

        assert!(entity.components.checkin(RenderComponent::TYPE_KEY, taken).is_none());
        assert_eq!(
            entity.component_keys(),
            vec![RenderComponent::TYPE_KEY, ObjectiveScreen::TYPE_KEY]
        );
    }
}
