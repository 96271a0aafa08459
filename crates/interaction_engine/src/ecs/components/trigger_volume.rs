//! Trigger volume marker

use serde::{Deserialize, Serialize};

use crate::ecs::{persist, Component, ComponentType, PersistedData};
use crate::physics::{BodyKind, TriggerFlags};

/// Marks an entity's collider as a trigger and filters which bodies it reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerVolume {
    /// Body kinds that produce notifications
    pub flags: TriggerFlags,
}

impl TriggerVolume {
    /// Create a trigger volume reporting the given body kinds
    pub fn new(flags: TriggerFlags) -> Self {
        Self { flags }
    }

    /// Whether a body of this kind produces notifications
    pub fn accepts(&self, kind: BodyKind) -> bool {
        self.flags.accepts(kind)
    }
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self::new(TriggerFlags::default())
    }
}

impl Component for TriggerVolume {
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for TriggerVolume {
    const TYPE_KEY: &'static str = "TriggerVolume";
}
