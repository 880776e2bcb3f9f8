// MovieDeck Settings Engine
// Loads and saves `settings.json` from the platform config dir, with dotted-key updates.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &AppSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

/// Settings engine persisting [`AppSettings`] as pretty-printed JSON.
pub struct SettingsEngine {
    config_path: PathBuf,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Uses `path_override` if given, otherwise `<config dir>/settings.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self {
            config_path,
            settings: AppSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from disk.
    ///
    /// A missing file yields defaults. A file that does not parse is an error
    /// rather than a silent reset, so a typo never wipes the user's choices.
    fn load(&mut self) -> Result<AppSettings, SettingsError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no settings file, using defaults");
            self.settings = AppSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", self.config_path.display(), e))
        })?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::Serialization(format!(
                "Failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        info!(path = %self.config_path.display(), "settings loaded");
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating the parent directory if needed.
    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        fs::write(&self.config_path, json).map_err(|e| {
            SettingsError::Io(format!("Failed to write {}: {}", self.config_path.display(), e))
        })
    }

    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Replaces one setting addressed by a dotted path such as
    /// `"storage.durable"` or `"images.poster_base_url"`, then saves.
    ///
    /// The whole settings value is round-tripped through JSON so the new value
    /// is type-checked against [`AppSettings`] before anything is written.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }

        let mut root = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        let (leaf, parents) = parts
            .split_last()
            .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
        let mut current = &mut root;
        for part in parents {
            current = current
                .get_mut(*part)
                .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
        }
        match current {
            Value::Object(map) if map.contains_key(*leaf) => {
                map.insert(leaf.to_string(), value);
            }
            _ => return Err(SettingsError::InvalidKey(key.to_string())),
        }

        self.settings = serde_json::from_value(root)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        self.save()
    }

    /// Restores defaults and saves them.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
