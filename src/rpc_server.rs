//! MovieDeck RPC Server: JSON-RPC over stdin/stdout for the UI process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"favorites.toggle", "params":{"movie":{"id":27205,"title":"Inception"}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use moviedeck::app::{App, DATABASE_FILE};
use moviedeck::rpc_handler::handle_method;
use moviedeck::services::logging;
use moviedeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use moviedeck::types::settings::AppSettings;

use serde_json::{json, Value};
use tracing::{info, warn};

/// Fixed-window limiter on requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn load_settings() -> AppSettings {
    let mut engine = SettingsEngine::new(None);
    let mut settings = match engine.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("moviedeck-rpc: {}; using default settings", e);
            AppSettings::default()
        }
    };
    // MOVIEDECK_DATA_DIR wins over the settings file.
    if let Ok(dir) = std::env::var("MOVIEDECK_DATA_DIR") {
        settings.storage.database_path =
            Some(PathBuf::from(dir).join(DATABASE_FILE).to_string_lossy().to_string());
    }
    settings
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> io::Result<()> {
    let settings = load_settings();
    logging::init(&settings.logging.level);

    let app = Mutex::new(App::new(settings));
    let mut rate_limiter = RateLimiter::new(200);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;
    info!("rpc server ready");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            respond(&mut out, &json!({"id": id, "error": "rate limit exceeded"}))?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                warn!(method, error = %err, "rpc call failed");
                json!({"id": id, "error": err})
            }
        };
        respond(&mut out, &response)?;
    }

    if let Ok(mut a) = app.lock() {
        a.end_session();
    }
    Ok(())
}
