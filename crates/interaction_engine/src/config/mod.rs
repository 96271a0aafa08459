//! Configuration system

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::foundation::Vec3;
use crate::input::{KeyBindings, LogicalAction};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings shared by the interaction components and the scene builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Logical action that activates an interactable while the player is inside its trigger
    pub interact_action: LogicalAction,

    /// Name of the entity holding the scene's checklist tracker
    pub checklist_entity: String,

    /// Name of the entity holding the objective HUD counter
    pub objective_screen_entity: String,

    /// Number of checklist lines the scene tracks
    pub checklist_capacity: usize,

    /// Offset applied to a checklist line when it is crossed off
    pub checklist_hide_offset: Vec3,

    /// Physical key for each logical action
    pub bindings: KeyBindings,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            interact_action: LogicalAction::Interact,
            checklist_entity: "Floor Manager".to_string(),
            objective_screen_entity: "Screen".to_string(),
            checklist_capacity: 3,
            checklist_hide_offset: Vec3::new(0.0, 0.0, -100.0),
            bindings: KeyBindings::default(),
        }
    }
}

impl Config for InteractionConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("interaction_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_original_scene() {
        let config = InteractionConfig::default();
        assert_eq!(config.checklist_entity, "Floor Manager");
        assert_eq!(config.checklist_capacity, 3);
        assert_eq!(config.bindings.key_for(LogicalAction::Interact), Some(KeyCode::E));
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("config.ron");
        let mut config = InteractionConfig::default();
        config.checklist_capacity = 5;
        config.objective_screen_entity = "HUD".to_string();

        config.save_to_file(&path).unwrap();
        let loaded = InteractionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("config.toml");
        let mut config = InteractionConfig::default();
        config.checklist_hide_offset = Vec3::new(0.0, -5.0, 0.0);

        config.save_to_file(&path).unwrap();
        let loaded = InteractionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: InteractionConfig = toml::from_str("checklist_capacity = 4\n").unwrap();
        assert_eq!(config.checklist_capacity, 4);
        assert_eq!(config.checklist_entity, "Floor Manager");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = InteractionConfig::load_from_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let path = temp_path("present.yaml");
        std::fs::write(&path, "interact_action: Interact").unwrap();
        let result = InteractionConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let save = InteractionConfig::default().save_to_file(temp_path("settings.yaml"));
        assert!(matches!(save, Err(ConfigError::UnsupportedFormat(_))));
    }
}
