//! Physics collaborator interface
//!
//! Overlap detection happens elsewhere; this module only carries the bodies
//! it knows about and the trigger enter/leave notifications it produces.

pub mod bridge;
pub mod trigger;

pub use bridge::{BodyKey, PhysicsBridge};
pub use trigger::{TriggerEvent, TriggerFlags};

use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;

/// How a rigid body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves
    Static,
    /// Moved by code (character controllers)
    Kinematic,
    /// Moved by the simulation
    Dynamic,
}

/// Handle to a registered body, resolvable to the entity that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef {
    pub(crate) key: BodyKey,
    pub(crate) owner: EntityId,
    pub(crate) kind: BodyKind,
}

impl BodyRef {
    /// Entity owning the body
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Body kind
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Registry key
    pub fn key(&self) -> BodyKey {
        self.key
    }
}
