//! Checklist tracker
//!
//! A fixed-capacity ordered list of entities (the lines of an on-screen
//! checklist) with per-line completion flags. Completing a line moves its
//! entity by the tracker's hide offset, exactly once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ecs::{persist, Component, ComponentType, EntityId, PersistedData, World};
use crate::foundation::Vec3;

/// Offset applied to a line's position when it is crossed off
pub const DEFAULT_HIDE_OFFSET: [f32; 3] = [0.0, 0.0, -100.0];

/// Checklist errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecklistError {
    /// `push` or `mark_complete` before `initialize`
    #[error("Checklist used before initialize")]
    NotInitialized,

    /// More entries pushed than the checklist holds
    #[error("Checklist capacity {capacity} exceeded; {dropped} entries dropped")]
    CapacityExceeded {
        /// Checklist capacity
        capacity: usize,
        /// Entries not tracked
        dropped: usize,
    },

    /// Index at or past capacity
    #[error("Checklist index {index} out of range (capacity {capacity})")]
    IndexOutOfRange {
        /// Requested line
        index: usize,
        /// Checklist capacity
        capacity: usize,
    },

    /// Index within capacity but never pushed
    #[error("Checklist index {0} has no tracked entity")]
    Untracked(usize),

    /// Tracker entity lacks a tracker component
    #[error("Entity {0} has no checklist tracker")]
    MissingTracker(EntityId),

    /// Line entity was destroyed
    #[error("Tracked entity {0} no longer exists")]
    MissingEntity(EntityId),
}

/// Result of marking a line complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The line was open and is now complete; carries its entity
    Newly(EntityId),
    /// The line was already complete; nothing changed
    AlreadyComplete,
}

/// Ordered checklist of entities with completion flags.
///
/// Runtime state only; persists as an empty object and is rebuilt by scene setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistTracker {
    #[serde(skip)]
    capacity: Option<usize>,
    #[serde(skip)]
    entries: Vec<EntityId>,
    #[serde(skip)]
    completed: Vec<bool>,
    #[serde(skip)]
    hide_offset: Vec3,
}

impl Default for ChecklistTracker {
    fn default() -> Self {
        Self {
            capacity: None,
            entries: Vec::new(),
            completed: Vec::new(),
            hide_offset: Vec3::from(DEFAULT_HIDE_OFFSET),
        }
    }
}

impl ChecklistTracker {
    /// Allocate `capacity` open lines, discarding any previous contents
    pub fn initialize(&mut self, capacity: usize) {
        self.capacity = Some(capacity);
        self.entries.clear();
        self.completed = vec![false; capacity];
    }

    /// Builder: override the hide offset
    pub fn with_hide_offset(mut self, offset: Vec3) -> Self {
        self.hide_offset = offset;
        self
    }

    /// Offset applied to completed lines
    pub fn hide_offset(&self) -> Vec3 {
        self.hide_offset
    }

    /// Set the offset applied to completed lines
    pub fn set_hide_offset(&mut self, offset: Vec3) {
        self.hide_offset = offset;
    }

    /// Track entities in order, up to capacity.
    ///
    /// Entries beyond capacity are dropped and reported; the rest are kept.
    pub fn push(&mut self, entities: impl IntoIterator<Item = EntityId>) -> Result<usize, ChecklistError> {
        let capacity = self.capacity.ok_or(ChecklistError::NotInitialized)?;
        let mut dropped = 0;
        for entity in entities {
            if self.entries.len() < capacity {
                self.entries.push(entity);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("Checklist full at {} lines; dropped {}", capacity, dropped);
            return Err(ChecklistError::CapacityExceeded { capacity, dropped });
        }
        Ok(self.entries.len())
    }

    /// Mark a line complete. Idempotent; never changes flags on error.
    pub fn mark_complete(&mut self, index: usize) -> Result<Completion, ChecklistError> {
        let capacity = self.capacity.ok_or(ChecklistError::NotInitialized)?;
        if index >= capacity {
            return Err(ChecklistError::IndexOutOfRange { index, capacity });
        }
        let entity = *self.entries.get(index).ok_or(ChecklistError::Untracked(index))?;
        if self.completed[index] {
            return Ok(Completion::AlreadyComplete);
        }
        self.completed[index] = true;
        Ok(Completion::Newly(entity))
    }

    /// Capacity, or zero before initialize
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(0)
    }

    /// Whether initialize has been called
    pub fn is_initialized(&self) -> bool {
        self.capacity.is_some()
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entities are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked entity at `index`
    pub fn entry(&self, index: usize) -> Option<EntityId> {
        self.entries.get(index).copied()
    }

    /// Whether line `index` is complete (false when out of range)
    pub fn is_complete(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// Completion flag per line
    pub fn completion_flags(&self) -> &[bool] {
        &self.completed
    }

    /// Number of completed lines
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|&&done| done).count()
    }

    /// Whether every line is complete
    pub fn all_complete(&self) -> bool {
        self.is_initialized() && self.completed.iter().all(|&done| done)
    }
}

impl Component for ChecklistTracker {
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for ChecklistTracker {
    const TYPE_KEY: &'static str = "ChecklistTracker";
}

/// Cross off line `index` of the tracker on `tracker` and hide its entity.
///
/// The tracked entity is moved by the hide offset only on the first completion.
pub fn mark_complete(world: &mut World, tracker: EntityId, index: usize) -> Result<Completion, ChecklistError> {
    let checklist = world
        .get_mut::<ChecklistTracker>(tracker)
        .ok_or(ChecklistError::MissingTracker(tracker))?;
    let offset = checklist.hide_offset;
    let completion = checklist.mark_complete(index)?;

    match completion {
        Completion::Newly(entity) => {
            let transform = world
                .transform_mut(entity)
                .ok_or(ChecklistError::MissingEntity(entity))?;
            transform.translate(offset);
            let name = world.entity(entity).map_or("<unnamed>", |e| e.name());
            log::info!("Crossed off checklist line {}: {}", index, name);
        }
        Completion::AlreadyComplete => {
            log::debug!("Checklist line {} already complete", index);
        }
    }
    Ok(completion)
}
