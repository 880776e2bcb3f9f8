//! MovieDeck console demo.
//!
//! Walks through the stores against an in-memory session and prints what each
//! step leaves behind. Set `MOVIEDECK_LOG=debug` to watch the storage calls.

use moviedeck::app::App;
use moviedeck::services::logging;
use moviedeck::stores::favorites_store::FavoritesStoreTrait;
use moviedeck::stores::rating_store::RatingStoreTrait;
use moviedeck::stores::search_history_store::SearchHistoryStoreTrait;
use moviedeck::types::movie::MovieSummary;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_favorites(app: &mut App) {
    section("Favorites");

    let inception = MovieSummary::new(27205, "Inception").with_poster("/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg");
    let dune = MovieSummary::new(438631, "Dune");

    let set = app.favorites.add(inception.clone());
    println!("  add Inception      -> {} favorite(s)", set.len());
    let set = app.favorites.add(inception.clone());
    println!("  add Inception again -> {} favorite(s)", set.len());
    let set = app.favorites.toggle(dune);
    println!("  toggle Dune        -> {:?}", set.ids());
    let set = app.favorites.toggle(inception);
    println!("  toggle Inception   -> {:?}", set.ids());

    for movie in &app.favorites.list() {
        let poster = movie
            .poster_url(app.poster_base_url())
            .unwrap_or_else(|| "(no poster)".to_string());
        println!("  * {} [{}] {}", movie.title, movie.id, poster);
    }
    println!();
}

fn demo_ratings(app: &mut App) {
    section("Ratings");

    println!("  Inception unrated  -> {}", app.ratings.get_rating(27205));
    match app.ratings.set_rating(27205, 4) {
        Ok(r) => println!("  rate 4             -> {}", r),
        Err(e) => println!("  rate 4 failed: {}", e),
    }
    match app.ratings.set_rating(27205, 7) {
        Ok(r) => println!("  rate 7             -> {}", r),
        Err(e) => println!("  rate 7 rejected    -> {}", e),
    }
    println!("  Inception now      -> {}", app.ratings.get_rating(27205));
    println!();
}

fn demo_search_history(app: &mut App) {
    section("Search history");

    app.search_history.set_last_query("dune");
    println!("  last query         -> {:?}", app.search_history.get_last_query());
    app.end_session();
    println!("  after session end  -> {:?}", app.search_history.get_last_query());
    println!();
}

fn main() {
    logging::init("warn");

    println!();
    println!("  MovieDeck v{} (demo, in-memory)", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::in_memory();
    demo_favorites(&mut app);
    demo_ratings(&mut app);
    demo_search_history(&mut app);
}
