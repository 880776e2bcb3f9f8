//! Unit tests for the RPC handler, going through the same `handle_method`
//! path the `moviedeck-rpc` binary uses, over a temporary on-disk database.

use std::sync::Mutex;

use moviedeck::app::App;
use moviedeck::rpc_handler::handle_method;
use moviedeck::types::settings::AppSettings;
use serde_json::json;
use tempfile::TempDir;

fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let mut settings = AppSettings::default();
    settings.storage.database_path = Some(tmp.path().join("test.db").to_string_lossy().to_string());
    (Mutex::new(App::new(settings)), tmp)
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "nonexistent.method", &json!({})).unwrap_err();
    assert!(err.contains("unknown method"));
}

#[test]
fn test_storage_status_reports_sqlite() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "storage.status", &json!({})).unwrap();
    assert_eq!(res, json!({"backend": "sqlite", "degraded": false}));
}

// ─── Favorites ───

#[test]
fn test_favorites_toggle_round_trip() {
    let (app, _tmp) = setup();
    let movie = json!({"id": 27205, "title": "Inception", "poster_path": "/i.jpg"});

    let res = handle_method(&app, "favorites.toggle", &json!({"movie": movie})).unwrap();
    assert_eq!(res["favorited"], json!(true));
    assert_eq!(res["favorites"][0]["id"], json!(27205));
    assert_eq!(
        res["favorites"][0]["poster_url"],
        json!("https://image.tmdb.org/t/p/w500/i.jpg")
    );

    let res = handle_method(&app, "favorites.contains", &json!({"id": 27205})).unwrap();
    assert_eq!(res["favorited"], json!(true));

    let res = handle_method(&app, "favorites.toggle", &json!({"movie": movie})).unwrap();
    assert_eq!(res["favorited"], json!(false));
    assert_eq!(res["favorites"], json!([]));
}

#[test]
fn test_favorites_add_list_remove_clear() {
    let (app, _tmp) = setup();
    handle_method(&app, "favorites.add", &json!({"movie": {"id": 1, "title": "A"}})).unwrap();
    handle_method(&app, "favorites.add", &json!({"movie": {"id": 2, "title": "B"}})).unwrap();
    handle_method(&app, "favorites.add", &json!({"movie": {"id": 1, "title": "A"}})).unwrap();

    let list = handle_method(&app, "favorites.list", &json!({})).unwrap();
    assert_eq!(list.as_array().map(|a| a.len()), Some(2));
    assert_eq!(list[0]["poster_url"], json!(null));

    let list = handle_method(&app, "favorites.remove", &json!({"id": 1})).unwrap();
    assert_eq!(list[0]["id"], json!(2));

    let list = handle_method(&app, "favorites.clear", &json!({})).unwrap();
    assert_eq!(list, json!([]));
}

#[test]
fn test_favorites_add_rejects_movie_without_id() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "favorites.add", &json!({"movie": {"title": "Nameless"}})).unwrap_err();
    assert!(err.contains("Invalid argument"));
    let list = handle_method(&app, "favorites.list", &json!({})).unwrap();
    assert_eq!(list, json!([]));
}

#[test]
fn test_favorites_missing_params() {
    let (app, _tmp) = setup();
    assert_eq!(handle_method(&app, "favorites.add", &json!({})).unwrap_err(), "missing movie");
    assert_eq!(handle_method(&app, "favorites.remove", &json!({})).unwrap_err(), "missing id");
}

#[test]
fn test_non_integer_id_is_not_reported_missing() {
    let (app, _tmp) = setup();
    for id in [json!("27205"), json!(4.5), json!(u64::MAX)] {
        let err = handle_method(&app, "favorites.contains", &json!({"id": id})).unwrap_err();
        assert!(err.starts_with("id must be an integer"), "{}", err);
    }
}

// ─── Ratings ───

#[test]
fn test_rating_set_and_get() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "rating.set", &json!({"id": 27205, "value": 4})).unwrap();
    assert_eq!(res, json!({"id": 27205, "rating": 4}));

    let err = handle_method(&app, "rating.set", &json!({"id": 27205, "value": 7})).unwrap_err();
    assert!(err.contains("between 0 and 5"));

    let res = handle_method(&app, "rating.get", &json!({"id": 27205})).unwrap();
    assert_eq!(res["rating"], json!(4));
}

#[test]
fn test_rating_set_value_errors() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "rating.set", &json!({"id": 1})).unwrap_err();
    assert_eq!(err, "missing value");
    let err = handle_method(&app, "rating.set", &json!({"id": 1, "value": "4"})).unwrap_err();
    assert!(err.starts_with("value must be an integer"), "{}", err);
    let err = handle_method(&app, "rating.set", &json!({"id": "1", "value": 4})).unwrap_err();
    assert!(err.starts_with("id must be an integer"), "{}", err);
}

// ─── Search / session ───

#[test]
fn test_search_query_cleared_by_session_end() {
    let (app, _tmp) = setup();
    handle_method(&app, "search.set_last_query", &json!({"query": "dune"})).unwrap();
    let res = handle_method(&app, "search.get_last_query", &json!({})).unwrap();
    assert_eq!(res, json!({"query": "dune"}));

    handle_method(&app, "session.end", &json!({})).unwrap();
    let res = handle_method(&app, "search.get_last_query", &json!({})).unwrap();
    assert_eq!(res, json!({"query": null}));
}

#[test]
fn test_favorites_survive_app_restart_but_search_does_not() {
    let tmp = TempDir::new().unwrap();
    let mut settings = AppSettings::default();
    settings.storage.database_path = Some(tmp.path().join("test.db").to_string_lossy().to_string());

    {
        let app = Mutex::new(App::new(settings.clone()));
        handle_method(&app, "favorites.add", &json!({"movie": {"id": 5, "title": "E"}})).unwrap();
        handle_method(&app, "search.set_last_query", &json!({"query": "e"})).unwrap();
    }

    let app = Mutex::new(App::new(settings));
    let res = handle_method(&app, "favorites.contains", &json!({"id": 5})).unwrap();
    assert_eq!(res["favorited"], json!(true));
    let res = handle_method(&app, "search.get_last_query", &json!({})).unwrap();
    assert_eq!(res["query"], json!(null));
}

#[test]
fn test_unopenable_database_degrades_to_memory() {
    let tmp = TempDir::new().unwrap();
    // A directory where the database file should be.
    let blocked = tmp.path().join("blocked.db");
    std::fs::create_dir_all(&blocked).unwrap();
    let mut settings = AppSettings::default();
    settings.storage.database_path = Some(blocked.to_string_lossy().to_string());

    let app = Mutex::new(App::new(settings));
    let res = handle_method(&app, "storage.status", &json!({})).unwrap();
    assert_eq!(res, json!({"backend": "memory", "degraded": true}));

    handle_method(&app, "favorites.add", &json!({"movie": {"id": 9, "title": "I"}})).unwrap();
    let res = handle_method(&app, "favorites.contains", &json!({"id": 9})).unwrap();
    assert_eq!(res["favorited"], json!(true));
}
