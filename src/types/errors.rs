use thiserror::Error;

// === StoreError ===

/// Errors raised by the persistence adapter and the stores built on it.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// The backing key-value store could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    /// A stored value is not valid JSON or does not have the expected shape.
    #[error("Malformed data under '{key}': {reason}")]
    MalformedData { key: String, reason: String },
    /// The caller passed a value the store refuses to persist.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// === SettingsError ===

/// Errors related to settings loading, saving, and updates.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// The settings file could not be parsed or serialized.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The dotted key does not name a setting.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The new value does not fit the setting's type.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
