//! Integration-level tests for the SettingsEngine public API: defaults,
//! persistence of dotted-key updates, reset, and malformed files.

use moviedeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use moviedeck::types::errors::SettingsError;
use moviedeck::types::settings::AppSettings;
use serde_json::json;
use tempfile::TempDir;

/// The caller holds the `TempDir` so the file outlives the engine.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    SettingsEngine::new(Some(dir.path().join("settings.json")))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert_eq!(engine.load().unwrap(), AppSettings::default());
    assert!(engine.get_settings().storage.durable);
    assert_eq!(engine.get_settings().logging.level, "info");
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("storage.durable", json!(false)).unwrap();
        engine
            .set_value("images.poster_base_url", json!("https://img.example/w342"))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert!(!loaded.storage.durable);
    assert_eq!(loaded.images.poster_base_url, "https://img.example/w342");
}

#[test]
fn test_set_optional_database_path() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine
        .set_value("storage.database_path", json!("/var/lib/moviedeck/db.sqlite"))
        .unwrap();
    assert_eq!(
        engine.get_settings().storage.database_path.as_deref(),
        Some("/var/lib/moviedeck/db.sqlite")
    );
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("logging.level", json!("debug")).unwrap();
    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &AppSettings::default());

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), AppSettings::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ storage: ").unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::Serialization(_))));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");
    let engine = SettingsEngine::new(Some(path.clone()));
    engine.save().unwrap();
    assert!(path.exists());
}
