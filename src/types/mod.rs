// MovieDeck shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod movie;
pub mod rating;
pub mod settings;
