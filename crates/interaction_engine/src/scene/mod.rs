//! Scene persistence
//!
//! Captures a [`World`](crate::ecs::World) into a [`SceneDocument`] and
//! rebuilds it again, through JSON or RON files.

mod document;

pub use document::{EntityRecord, SceneDocument, SceneError};
