// MovieDeck storage layer
// Backends hold raw strings; the adapter adds JSON encoding and the degrade policy.

pub mod adapter;
pub mod backend;
pub mod sqlite_backend;

pub use adapter::PersistenceAdapter;
pub use backend::{KeyValueBackend, MemoryBackend};
pub use sqlite_backend::SqliteBackend;
