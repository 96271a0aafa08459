//! HUD counter of achieved objectives

use serde::{Deserialize, Serialize};

use crate::ecs::{persist, Component, ComponentType, PersistedData};

/// Objective counter shown on the in-world screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveScreen {
    /// Objectives achieved so far
    pub objectives_achieved: u32,
    /// Whether the screen is switched on
    pub active: bool,
}

impl ObjectiveScreen {
    /// Count one more achieved objective and switch the screen on
    pub fn record_objective(&mut self) -> u32 {
        self.objectives_achieved += 1;
        self.active = true;
        self.objectives_achieved
    }
}

impl Component for ObjectiveScreen {
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for ObjectiveScreen {
    const TYPE_KEY: &'static str = "ObjectiveScreen";
}
