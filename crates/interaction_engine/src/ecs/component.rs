//! Component trait and implementations
//!
//! A component is a unit of behaviour owned by exactly one entity. The entity
//! stores it behind `Box<dyn Component>` under the type's stable
//! [`ComponentType::TYPE_KEY`]; typed lookup downcasts through [`AsAny`].

use std::any::Any;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{EntityId, World};
use crate::input::ActionInput;
use crate::physics::TriggerEvent;

/// Persisted form of one component
pub type PersistedData = serde_json::Value;

/// Type-erased access used for downcasting boxed components
pub trait AsAny: Any {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a boxed value into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Access handed to lifecycle and trigger hooks
pub struct Context<'a> {
    /// The world, minus the component being called
    pub world: &'a mut World,
    /// Entity that owns the component
    pub owner: EntityId,
}

/// Access handed to [`Component::update`]
pub struct UpdateContext<'a> {
    /// The world, minus the component being updated
    pub world: &'a mut World,
    /// Entity that owns the component
    pub owner: EntityId,
    /// Edge-detected input for this tick
    pub input: &'a dyn ActionInput,
    /// Seconds since the previous tick
    pub delta_time: f32,
}

/// Behaviour attached to an entity
///
/// While a hook runs, the component is checked out of its entity, so the hook
/// may freely mutate the rest of the world (including its own entity's
/// transform and sibling components).
pub trait Component: AsAny + std::fmt::Debug {
    /// Called when attached; `owner` is a non-owning back-reference
    fn on_attach(&mut self, _owner: EntityId) {}

    /// Called when detached or when the owner is destroyed
    fn on_detach(&mut self) {}

    /// Called once when the scene starts
    fn awake(&mut self, _ctx: &mut Context<'_>) {}

    /// Called once per tick, in scene-registration order
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Whether this component wants trigger enter/leave notifications
    fn handles_triggers(&self) -> bool {
        false
    }

    /// Trigger notification from the physics collaborator
    fn on_trigger(&mut self, _event: TriggerEvent, _ctx: &mut Context<'_>) {}

    /// Persisted form of this component
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error>;
}

/// Statically known component type with a stable key and serde persistence
pub trait ComponentType: Component + Default + Serialize + DeserializeOwned {
    /// Stable identifier used for lookup and in persisted data
    const TYPE_KEY: &'static str;
}

/// Serialize a component into its persisted form
pub fn persist<T: Serialize>(component: &T) -> Result<PersistedData, serde_json::Error> {
    serde_json::to_value(component)
}

/// One entry of an entity's persisted component set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedComponent {
    /// Registered type key
    pub type_key: String,
    /// Component data
    pub data: PersistedData,
}
