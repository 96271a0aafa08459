//! Skin collection carried by the player; interaction rewards land here

use serde::{Deserialize, Serialize};

use crate::ecs::{persist, Component, ComponentType, PersistedData};
use crate::foundation::MaterialHandle;

/// Unlocked skins and the currently equipped one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinCollection {
    skins: Vec<MaterialHandle>,
    equipped: Option<usize>,
}

impl SkinCollection {
    /// Unlock a skin. Returns false if it was already unlocked.
    pub fn add_skin(&mut self, skin: MaterialHandle) -> bool {
        if self.skins.contains(&skin) {
            log::debug!("Skin {} already unlocked", skin);
            return false;
        }
        self.skins.push(skin);
        log::info!("Unlocked skin {}", skin);
        true
    }

    /// Unlocked skins in unlock order
    pub fn skins(&self) -> &[MaterialHandle] {
        &self.skins
    }

    /// Whether a skin is unlocked
    pub fn contains(&self, skin: MaterialHandle) -> bool {
        self.skins.contains(&skin)
    }

    /// Equip an unlocked skin
    pub fn equip(&mut self, skin: MaterialHandle) -> bool {
        match self.skins.iter().position(|&s| s == skin) {
            Some(index) => {
                self.equipped = Some(index);
                true
            }
            None => false,
        }
    }

    /// Currently equipped skin
    pub fn equipped(&self) -> Option<MaterialHandle> {
        self.equipped.and_then(|i| self.skins.get(i).copied())
    }
}

impl Component for SkinCollection {
    fn to_persisted(&self) -> Result<PersistedData, serde_json::Error> {
        persist(self)
    }
}

impl ComponentType for SkinCollection {
    const TYPE_KEY: &'static str = "SkinCollection";
}
