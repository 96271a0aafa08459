//! Input management system
//!
//! The windowing layer feeds raw key transitions into [`InputManager`];
//! gameplay code only ever asks the edge question through [`ActionInput`]:
//! "was this logical action newly pressed this tick".

mod bindings;

pub use bindings::{Binding, KeyBindings, LogicalAction};

use std::collections::HashMap;

/// Query surface gameplay components poll during their update
pub trait ActionInput {
    /// True only on the tick the bound key went down (at most once per physical press)
    fn is_action_pressed_this_tick(&self, action: LogicalAction) -> bool;
}

/// Per-key state, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Went down this tick
    Pressed,
    /// Held since an earlier tick
    Down,
    /// Went up this tick
    Released,
    /// Not held
    #[default]
    Up,
}

impl ButtonState {
    /// Whether the key is currently held
    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::Down)
    }
}

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    keys: HashMap<KeyCode, ButtonState>,
    bindings: KeyBindings,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input manager with custom bindings
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            keys: HashMap::new(),
            bindings,
        }
    }

    /// Handle key input from the window layer
    ///
    /// Repeated "pressed" reports for a key that is already held are ignored,
    /// so OS key-repeat never produces a second edge.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        let state = self.keys.entry(key).or_default();
        *state = match (pressed, *state) {
            (true, current) if current.is_down() => current,
            (true, _) => ButtonState::Pressed,
            (false, current) if current.is_down() => ButtonState::Released,
            (false, current) => current,
        };
    }

    /// Advance edge states at the end of a tick
    pub fn end_tick(&mut self) {
        for state in self.keys.values_mut() {
            *state = match *state {
                ButtonState::Pressed => ButtonState::Down,
                ButtonState::Released => ButtonState::Up,
                other => other,
            };
        }
    }

    /// Current state of a key
    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    /// Active bindings
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Replace the active bindings
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }
}

impl ActionInput for InputManager {
    fn is_action_pressed_this_tick(&self, action: LogicalAction) -> bool {
        self.bindings
            .key_for(action)
            .is_some_and(|key| self.key_state(key) == ButtonState::Pressed)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_triggered() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::E, true);
        assert!(input.is_action_pressed_this_tick(LogicalAction::Interact));

        input.end_tick();
        assert_eq!(input.key_state(KeyCode::E), ButtonState::Down);
        assert!(!input.is_action_pressed_this_tick(LogicalAction::Interact));
    }

    #[test]
    fn test_key_repeat_does_not_retrigger() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::E, true);
        input.end_tick();

        // OS key repeat while held
        input.handle_key_input(KeyCode::E, true);
        assert!(!input.is_action_pressed_this_tick(LogicalAction::Interact));
    }

    #[test]
    fn test_release_then_press_again() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::E, true);
        input.end_tick();
        input.handle_key_input(KeyCode::E, false);
        assert_eq!(input.key_state(KeyCode::E), ButtonState::Released);
        input.end_tick();
        assert_eq!(input.key_state(KeyCode::E), ButtonState::Up);

        input.handle_key_input(KeyCode::E, true);
        assert!(input.is_action_pressed_this_tick(LogicalAction::Interact));
    }

    #[test]
    fn test_unbound_action_never_fires() {
        let mut input = InputManager::with_bindings(KeyBindings::empty());
        input.handle_key_input(KeyCode::E, true);
        assert!(!input.is_action_pressed_this_tick(LogicalAction::Interact));
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = KeyBindings::default();
        bindings.bind(LogicalAction::Interact, KeyCode::F);
        let mut input = InputManager::with_bindings(bindings);

        input.handle_key_input(KeyCode::E, true);
        assert!(!input.is_action_pressed_this_tick(LogicalAction::Interact));
        input.handle_key_input(KeyCode::F, true);
        assert!(input.is_action_pressed_this_tick(LogicalAction::Interact));
    }
}
