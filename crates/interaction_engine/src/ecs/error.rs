//! ECS error types

use thiserror::Error;

use super::EntityId;

/// Errors raised by entity and component operations
#[derive(Error, Debug)]
pub enum EcsError {
    /// No constructor/deserializer registered for a type key
    #[error("Component type '{0}' is not registered")]
    Unregistered(String),

    /// Entity id does not resolve to a live entity
    #[error("Entity {0} does not exist")]
    NoSuchEntity(EntityId),

    /// Component is checked out for an update or trigger call
    #[error("Component '{0}' is currently checked out")]
    CheckedOut(&'static str),

    /// Registered constructor built a different concrete type
    #[error("Constructor registered for '{0}' produced a different type")]
    TypeMismatch(&'static str),

    /// Persisted form could not be produced
    #[error("Failed to serialize component '{key}': {source}")]
    Serialization {
        /// Type key of the component
        key: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Explicit entity id already in use
    #[error("Entity id {0} is already in use")]
    IdTaken(EntityId),

    /// Explicit entity id at the top of the id range
    #[error("Entity id {0} is out of range")]
    IdOutOfRange(EntityId),

    /// Hierarchy link that would make an entity its own parent
    #[error("Entity {0} cannot be parented to itself")]
    SelfParent(EntityId),
}
