// MovieDeck platform paths
// Linux:   config ~/.config/moviedeck, data ~/.local/share/moviedeck (XDG vars honoured)
// macOS:   both under ~/Library/Application Support/MovieDeck
// Windows: both under %APPDATA%/MovieDeck

use std::env;
use std::path::PathBuf;

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        mac_app_support()
    }
    #[cfg(target_os = "windows")]
    {
        windows_appdata()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        xdg_dir(env::var("XDG_CONFIG_HOME").ok(), &[".config"])
    }
}

/// Directory holding the favorites/ratings database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
    }
    #[cfg(target_os = "macos")]
    {
        mac_app_support()
    }
    #[cfg(target_os = "windows")]
    {
        windows_appdata()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        xdg_dir(env::var("XDG_DATA_HOME").ok(), &[".local", "share"])
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_*/moviedeck` when the variable is set and non-empty, else `~/<fallback>/moviedeck`.
#[allow(dead_code)]
fn xdg_dir(xdg: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join("moviedeck"),
        None => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join("moviedeck"),
    }
}

#[cfg(target_os = "macos")]
fn mac_app_support() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("MovieDeck")
}

#[cfg(target_os = "windows")]
fn windows_appdata() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("MovieDeck")
}
