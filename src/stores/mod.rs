// MovieDeck stores
// Favorites, ratings and search history, each a thin layer over a PersistenceAdapter.

pub mod favorites_store;
pub mod rating_store;
pub mod search_history_store;
