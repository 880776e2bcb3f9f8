//! MovieDeck database layer.
//!
//! Provides the SQLite connection behind durable storage, plus its migrations.
//!
//! # Usage
//!
//! ```no_run
//! use moviedeck::database::Database;
//!
//! let db = Database::open("moviedeck.db").expect("failed to open database");
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
