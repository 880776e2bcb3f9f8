//! Favorites Store for MovieDeck.
//!
//! Implements `FavoritesStoreTrait`: the user's favorited movies, persisted
//! as one JSON array under a fixed key. Every mutation re-reads storage,
//! applies the change and writes the whole set back, so callers holding an
//! older snapshot cannot resurrect or drop entries by accident.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::adapter::PersistenceAdapter;
use crate::types::movie::{FavoritesSet, MovieId, MovieSummary};

/// Storage key for the favorites array. Renaming it orphans existing data.
pub const FAVORITES_KEY: &str = "favorites";

/// Trait defining favorites operations.
pub trait FavoritesStoreTrait {
    fn list(&self) -> FavoritesSet;
    fn is_favorited(&self, id: MovieId) -> bool;
    fn add(&mut self, movie: MovieSummary) -> FavoritesSet;
    fn remove(&mut self, id: MovieId) -> FavoritesSet;
    fn toggle(&mut self, movie: MovieSummary) -> FavoritesSet;
    fn clear(&mut self) -> FavoritesSet;
}

/// Favorites store backed by a shared persistence adapter.
pub struct FavoritesStore {
    storage: Arc<PersistenceAdapter>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<PersistenceAdapter>) -> Self {
        Self { storage }
    }

    /// Validates a stored value entry by entry.
    ///
    /// Anything that is not an array reads as empty. Entries without an
    /// integer id are dropped, as are later repeats of an id.
    fn parse(value: Value) -> FavoritesSet {
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                warn!(key = FAVORITES_KEY, kind = json_kind(&other), "favorites is not an array, starting empty");
                return FavoritesSet::new();
            }
        };

        let mut set = FavoritesSet::new();
        for entry in &entries {
            match MovieSummary::from_value(entry) {
                Ok(movie) => {
                    if !set.insert(movie) {
                        debug!(key = FAVORITES_KEY, "dropping duplicate favorite");
                    }
                }
                Err(e) => warn!(key = FAVORITES_KEY, error = %e, "dropping malformed favorite"),
            }
        }
        set
    }

    fn persist(&self, set: &FavoritesSet) {
        if let Err(e) = self.storage.save_as(FAVORITES_KEY, set) {
            warn!(error = %e, count = set.len(), "favorites kept for this session only");
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FavoritesStoreTrait for FavoritesStore {
    /// Returns the stored favorites, or an empty set if none are stored.
    fn list(&self) -> FavoritesSet {
        self.storage
            .load(FAVORITES_KEY)
            .map(Self::parse)
            .unwrap_or_default()
    }

    fn is_favorited(&self, id: MovieId) -> bool {
        self.list().contains(id)
    }

    /// Appends `movie` unless its id is already a favorite.
    fn add(&mut self, movie: MovieSummary) -> FavoritesSet {
        let mut set = self.list();
        let id = movie.id;
        if set.insert(movie) {
            self.persist(&set);
            debug!(id, count = set.len(), "favorite added");
        }
        set
    }

    fn remove(&mut self, id: MovieId) -> FavoritesSet {
        let mut set = self.list();
        if set.remove(id) {
            self.persist(&set);
            debug!(id, count = set.len(), "favorite removed");
        }
        set
    }

    /// Removes `movie` if it is a favorite, otherwise adds it.
    ///
    /// The decision is made against freshly loaded storage, not a cached set.
    fn toggle(&mut self, movie: MovieSummary) -> FavoritesSet {
        let mut set = self.list();
        let id = movie.id;
        if set.contains(id) {
            set.remove(id);
        } else {
            set.insert(movie);
        }
        self.persist(&set);
        debug!(id, favorited = set.contains(id), count = set.len(), "favorite toggled");
        set
    }

    fn clear(&mut self) -> FavoritesSet {
        self.storage.remove(FAVORITES_KEY);
        debug!("favorites cleared");
        FavoritesSet::new()
    }
}
