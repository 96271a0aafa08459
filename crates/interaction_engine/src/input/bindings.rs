//! Logical actions and their key bindings

use serde::{Deserialize, Serialize};

use super::KeyCode;

/// Gameplay-level actions, independent of the physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LogicalAction {
    /// Use the object the player is standing at
    #[default]
    Interact,
    /// Accept a prompt
    Confirm,
    /// Back out of a prompt
    Cancel,
}

/// One action-to-key mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Logical action
    pub action: LogicalAction,
    /// Physical key
    pub key: KeyCode,
}

/// Action-to-key table, one key per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    entries: Vec<Binding>,
}

impl KeyBindings {
    /// Bindings with nothing mapped
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Map an action to a key, replacing any previous key for that action
    pub fn bind(&mut self, action: LogicalAction, key: KeyCode) {
        match self.entries.iter_mut().find(|b| b.action == action) {
            Some(existing) => existing.key = key,
            None => self.entries.push(Binding { action, key }),
        }
    }

    /// Key bound to an action
    pub fn key_for(&self, action: LogicalAction) -> Option<KeyCode> {
        self.entries.iter().find(|b| b.action == action).map(|b| b.key)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(LogicalAction::Interact, KeyCode::E);
        bindings.bind(LogicalAction::Confirm, KeyCode::Enter);
        bindings.bind(LogicalAction::Cancel, KeyCode::Escape);
        bindings
    }
}
