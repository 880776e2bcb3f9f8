//! MovieDeck: local state for a movie browsing app.
//!
//! Favorites, per-movie ratings and the last search query, persisted as JSON
//! in a key-value store. The UI talks to it in-process through [`app::App`]
//! or out-of-process through the `moviedeck-rpc` binary.

pub mod app;
pub mod database;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod stores;
pub mod types;
