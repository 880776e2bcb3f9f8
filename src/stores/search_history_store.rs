//! Search History Store for MovieDeck.
//!
//! Remembers the most recent search query so the search screen can restore
//! it. Meant to sit on the session adapter, which dies with the process.
//! Empty queries are stored as-is; whether "" counts as restorable is the
//! caller's call.

use std::sync::Arc;

use tracing::debug;

use crate::storage::adapter::PersistenceAdapter;

/// Storage key for the last query.
pub const LAST_QUERY_KEY: &str = "lastSearchQuery";

/// Trait defining search history operations.
pub trait SearchHistoryStoreTrait {
    fn get_last_query(&self) -> Option<String>;
    fn set_last_query(&mut self, query: &str);
    fn clear(&mut self);
}

pub struct SearchHistoryStore {
    storage: Arc<PersistenceAdapter>,
}

impl SearchHistoryStore {
    pub fn new(storage: Arc<PersistenceAdapter>) -> Self {
        Self { storage }
    }
}

impl SearchHistoryStoreTrait for SearchHistoryStore {
    fn get_last_query(&self) -> Option<String> {
        self.storage.load_as::<String>(LAST_QUERY_KEY)
    }

    fn set_last_query(&mut self, query: &str) {
        // The adapter already keeps the value in memory if this fails.
        let _ = self.storage.save_as(LAST_QUERY_KEY, &query);
        debug!(len = query.len(), "last search query set");
    }

    fn clear(&mut self) {
        self.storage.remove(LAST_QUERY_KEY);
    }
}
