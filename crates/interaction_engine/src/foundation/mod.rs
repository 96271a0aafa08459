//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the entity transform
//! - Opaque render resource handles
//! - Logging utilities

pub mod math;
pub mod handles;
pub mod logging;

pub use handles::{MaterialHandle, MeshHandle};
pub use math::{Transform, Vec3};
