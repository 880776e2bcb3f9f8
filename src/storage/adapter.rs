//! Persistence adapter: JSON values over a [`KeyValueBackend`].
//!
//! Reads never fail from the caller's point of view: a missing key, a
//! backend error, or stored text that is not JSON all come back as `None`.
//! Writes report failure but still land in a session overlay, so the rest of
//! the session keeps seeing its own changes after the backend goes away.
//!
//! A key whose read failed is fenced for the rest of the session: its writes
//! and deletes go to the overlay only. Callers read-modify-write, so a value
//! built on a failed read would otherwise replace the stored one.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::backend::KeyValueBackend;
use crate::types::errors::StoreError;

/// JSON persistence over an arbitrary key-value backend.
pub struct PersistenceAdapter {
    backend: Box<dyn KeyValueBackend>,
    /// Keys whose latest write or delete did not reach the backend.
    /// `None` marks a delete.
    overlay: Mutex<HashMap<String, Option<String>>>,
    /// Keys whose backend read failed; never written through again.
    fenced: Mutex<HashSet<String>>,
    degraded: AtomicBool,
}

impl PersistenceAdapter {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            overlay: Mutex::new(HashMap::new()),
            fenced: Mutex::new(HashSet::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// An adapter that starts out degraded, for when the intended backend
    /// could not be opened and `backend` is a stand-in.
    pub fn new_degraded(backend: Box<dyn KeyValueBackend>) -> Self {
        let adapter = Self::new(backend);
        adapter.degraded.store(true, Ordering::Relaxed);
        adapter
    }

    /// True once any backend operation has failed during this session.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Loads the JSON value stored under `key`.
    pub fn load(&self, key: &str) -> Option<Value> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let err = StoreError::MalformedData {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "ignoring stored value");
                None
            }
        }
    }

    /// Loads `key` and deserializes it into `T`; shape mismatches read as `None`.
    pub fn load_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.load(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                let err = StoreError::MalformedData {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "ignoring stored value");
                None
            }
        }
    }

    /// Serializes `value` under `key`.
    ///
    /// # Errors
    /// Returns `StoreError::StorageUnavailable` if the backend rejected the
    /// write or `key` is fenced. The value is still visible to later loads in
    /// this session.
    pub fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let raw = value.to_string();
        if self.is_fenced(key) {
            self.write_overlay(key, Some(raw));
            debug!(key, "read failed earlier, keeping write in memory");
            return Err(StoreError::StorageUnavailable(format!(
                "{} could not be read this session, not overwriting it",
                key
            )));
        }
        match self.backend.set(key, &raw) {
            Ok(()) => {
                self.clear_overlay(key);
                debug!(key, backend = self.backend.name(), "saved");
                Ok(())
            }
            Err(e) => {
                self.degrade(key, &e);
                self.write_overlay(key, Some(raw));
                Err(e)
            }
        }
    }

    /// Serializes any `Serialize` value under `key`.
    ///
    /// # Errors
    /// Returns `StoreError::MalformedData` if `value` cannot be represented as
    /// JSON, otherwise whatever [`PersistenceAdapter::save`] returns.
    pub fn save_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_value(value).map_err(|e| StoreError::MalformedData {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.save(key, &json)
    }

    /// Removes `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        if self.is_fenced(key) {
            self.write_overlay(key, None);
            debug!(key, "read failed earlier, keeping delete in memory");
            return;
        }
        match self.backend.delete(key) {
            Ok(()) => {
                self.clear_overlay(key);
                debug!(key, backend = self.backend.name(), "removed");
            }
            Err(e) => {
                self.degrade(key, &e);
                self.write_overlay(key, None);
            }
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        if let Ok(overlay) = self.overlay.lock() {
            if let Some(entry) = overlay.get(key) {
                return entry.clone();
            }
        }
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                self.degrade(key, &e);
                if let Ok(mut fenced) = self.fenced.lock() {
                    fenced.insert(key.to_string());
                }
                None
            }
        }
    }

    fn is_fenced(&self, key: &str) -> bool {
        self.fenced.lock().map(|f| f.contains(key)).unwrap_or(true)
    }

    fn degrade(&self, key: &str, err: &StoreError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            warn!(
                key,
                backend = self.backend.name(),
                error = %err,
                "backend failed, keeping changes in memory for this session"
            );
        } else {
            debug!(key, error = %err, "backend still failing");
        }
    }

    fn write_overlay(&self, key: &str, raw: Option<String>) {
        if let Ok(mut overlay) = self.overlay.lock() {
            overlay.insert(key.to_string(), raw);
        }
    }

    fn clear_overlay(&self, key: &str) {
        if let Ok(mut overlay) = self.overlay.lock() {
            overlay.remove(key);
        }
    }
}
