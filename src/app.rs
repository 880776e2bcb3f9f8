//! App Core for MovieDeck.
//!
//! One `App` is built per session and handed to whatever needs the stores.
//! It owns two adapters: a durable one (SQLite, or memory when durability is
//! off or the database cannot be opened) for favorites and ratings, and a
//! session one (always memory) for the last search query.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::platform;
use crate::storage::adapter::PersistenceAdapter;
use crate::storage::backend::{KeyValueBackend, MemoryBackend};
use crate::storage::sqlite_backend::SqliteBackend;
use crate::stores::favorites_store::FavoritesStore;
use crate::stores::rating_store::RatingStore;
use crate::stores::search_history_store::{SearchHistoryStore, SearchHistoryStoreTrait};
use crate::types::settings::AppSettings;

/// File name of the durable database inside the data dir.
pub const DATABASE_FILE: &str = "moviedeck.db";

/// Central application struct holding the adapters and stores.
pub struct App {
    pub settings: AppSettings,
    pub durable: Arc<PersistenceAdapter>,
    pub session: Arc<PersistenceAdapter>,
    pub favorites: FavoritesStore,
    pub ratings: RatingStore,
    pub search_history: SearchHistoryStore,
}

impl App {
    /// Builds the session from settings.
    ///
    /// Never fails: if the database cannot be opened the app runs on memory
    /// storage and the durable adapter reports itself degraded.
    pub fn new(settings: AppSettings) -> Self {
        let (backend, degraded): (Box<dyn KeyValueBackend>, bool) = if settings.storage.durable {
            let path = Self::database_path(&settings);
            match Self::open_database(&path) {
                Ok(db) => {
                    info!(path = %path.display(), "opened favorites database");
                    let backend: Box<dyn KeyValueBackend> = Box::new(SqliteBackend::new(db));
                    (backend, false)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "database unavailable, favorites will not outlive this session");
                    let backend: Box<dyn KeyValueBackend> = Box::new(MemoryBackend::new());
                    (backend, true)
                }
            }
        } else {
            info!("durable storage disabled, using memory");
            let backend: Box<dyn KeyValueBackend> = Box::new(MemoryBackend::new());
            (backend, false)
        };

        let durable = Arc::new(if degraded {
            PersistenceAdapter::new_degraded(backend)
        } else {
            PersistenceAdapter::new(backend)
        });
        let session = Arc::new(PersistenceAdapter::new(Box::new(MemoryBackend::new())));
        Self::with_adapters(settings, durable, session)
    }

    /// Builds an app over caller-supplied adapters.
    pub fn with_adapters(
        settings: AppSettings,
        durable: Arc<PersistenceAdapter>,
        session: Arc<PersistenceAdapter>,
    ) -> Self {
        Self {
            favorites: FavoritesStore::new(durable.clone()),
            ratings: RatingStore::new(durable.clone()),
            search_history: SearchHistoryStore::new(session.clone()),
            settings,
            durable,
            session,
        }
    }

    /// An app that keeps everything in memory.
    pub fn in_memory() -> Self {
        let settings = AppSettings {
            storage: crate::types::settings::StorageSettings {
                durable: false,
                database_path: None,
            },
            ..AppSettings::default()
        };
        Self::new(settings)
    }

    /// `storage.database_path` if set, else `<data dir>/moviedeck.db`.
    pub fn database_path(settings: &AppSettings) -> PathBuf {
        settings
            .storage
            .database_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| platform::get_data_dir().join(DATABASE_FILE))
    }

    fn open_database(path: &Path) -> Result<Database, Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Database::open(path)?)
    }

    /// Forgets session-scoped state. Favorites and ratings are untouched.
    pub fn end_session(&mut self) {
        self.search_history.clear();
        info!("session ended");
    }

    pub fn poster_base_url(&self) -> &str {
        &self.settings.images.poster_base_url
    }
}
