//! RPC method handler for the MovieDeck JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdio.
//! `handle_method` dispatches one call to the stores held by [`App`].

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::stores::favorites_store::FavoritesStoreTrait;
use crate::stores::rating_store::RatingStoreTrait;
use crate::stores::search_history_store::SearchHistoryStoreTrait;
use crate::types::movie::{FavoritesSet, MovieId, MovieSummary};

/// Integer param `name`. Absent and non-integer values get distinct errors.
fn param_i64(params: &Value, name: &str) -> Result<i64, String> {
    let value = params.get(name).ok_or_else(|| format!("missing {}", name))?;
    value
        .as_i64()
        .ok_or_else(|| format!("{} must be an integer, got {}", name, value))
}

fn param_id(params: &Value) -> Result<MovieId, String> {
    param_i64(params, "id")
}

fn param_movie(params: &Value) -> Result<MovieSummary, String> {
    let movie = params.get("movie").ok_or("missing movie")?;
    MovieSummary::from_value(movie).map_err(|e| e.to_string())
}

/// Favorites as sent to the UI, each with a resolved `poster_url`.
fn favorites_json(set: &FavoritesSet, poster_base: &str) -> Value {
    let arr: Vec<Value> = set
        .iter()
        .map(|m| {
            let mut v = serde_json::to_value(m).unwrap_or(Value::Null);
            if let Value::Object(map) = &mut v {
                map.insert("poster_url".to_string(), json!(m.poster_url(poster_base)));
            }
            v
        })
        .collect();
    Value::Array(arr)
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let base = a.poster_base_url().to_string();

    match method {
        // ─── Favorites ───
        "favorites.list" => Ok(favorites_json(&a.favorites.list(), &base)),
        "favorites.contains" => {
            let id = param_id(params)?;
            Ok(json!({"id": id, "favorited": a.favorites.is_favorited(id)}))
        }
        "favorites.add" => {
            let movie = param_movie(params)?;
            Ok(favorites_json(&a.favorites.add(movie), &base))
        }
        "favorites.remove" => {
            let id = param_id(params)?;
            Ok(favorites_json(&a.favorites.remove(id), &base))
        }
        "favorites.toggle" => {
            let movie = param_movie(params)?;
            let id = movie.id;
            let set = a.favorites.toggle(movie);
            Ok(json!({"favorited": set.contains(id), "favorites": favorites_json(&set, &base)}))
        }
        "favorites.clear" => Ok(favorites_json(&a.favorites.clear(), &base)),

        // ─── Ratings ───
        "rating.get" => {
            let id = param_id(params)?;
            Ok(json!({"id": id, "rating": a.ratings.get_rating(id).value()}))
        }
        "rating.set" => {
            let id = param_id(params)?;
            let value = param_i64(params, "value")?;
            let rating = a.ratings.set_rating(id, value).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "rating": rating.value()}))
        }

        // ─── Search ───
        "search.get_last_query" => Ok(json!({"query": a.search_history.get_last_query()})),
        "search.set_last_query" => {
            let query = params.get("query").and_then(|v| v.as_str()).ok_or("missing query")?;
            a.search_history.set_last_query(query);
            Ok(json!({"ok": true}))
        }

        // ─── Session ───
        "session.end" => {
            a.end_session();
            Ok(json!({"ok": true}))
        }
        "storage.status" => Ok(json!({
            "backend": a.durable.backend_name(),
            "degraded": a.durable.is_degraded(),
        })),

        _ => Err(format!("unknown method: {}", method)),
    }
}
