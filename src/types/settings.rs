use serde::{Deserialize, Serialize};

use super::movie::DEFAULT_POSTER_BASE_URL;

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub images: ImageSettings,
}

/// Where favorites and ratings live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// When false, nothing outlives the process.
    pub durable: bool,
    /// Overrides the database location; defaults to the platform data dir.
    pub database_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            durable: true,
            database_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `moviedeck=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSettings {
    pub poster_base_url: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            poster_base_url: DEFAULT_POSTER_BASE_URL.to_string(),
        }
    }
}
