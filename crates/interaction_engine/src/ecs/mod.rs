//! Entity-Component implementation
//!
//! A small, designer-oriented entity/component runtime: each entity owns at
//! most one component per behaviour type, components are looked up by type,
//! and the whole set round-trips through a persisted form via the
//! [`ComponentRegistry`].

pub mod world;
pub mod entity;
pub mod component;
pub mod registry;
pub mod components;
mod error;

pub use world::World;
pub use entity::{Entity, EntityId};
pub use component::{
    persist, Component, ComponentType, Context, PersistedComponent, PersistedData, UpdateContext,
};
pub use registry::{ComponentRegistry, DeserializeReport};
pub use error::EcsError;
pub use components::{
    ChecklistTracker, FeedbackAction, InteractionController, ObjectiveScreen, RenderComponent,
    SkinCollection, TriggerVolume,
};
