// MovieDeck services
// Process-wide concerns: settings file and log output.

pub mod logging;
pub mod settings_engine;
