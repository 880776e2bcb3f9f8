//! Property-based tests for FavoritesStore operations.
//!
//! Arbitrary sequences of add/remove/toggle must never leave duplicate ids,
//! and must agree with a plain ordered-list model of the same operations.

use std::sync::Arc;

use moviedeck::database::Database;
use moviedeck::storage::{PersistenceAdapter, SqliteBackend};
use moviedeck::stores::favorites_store::{FavoritesStore, FavoritesStoreTrait};
use moviedeck::types::movie::MovieSummary;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Remove(i64),
    Toggle(i64),
}

/// A small id space so operations collide often.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..8).prop_map(Op::Add),
        (0i64..8).prop_map(Op::Remove),
        (0i64..8).prop_map(Op::Toggle),
    ]
}

fn movie(id: i64) -> MovieSummary {
    MovieSummary::new(id, &format!("Movie {}", id))
}

fn fresh_store() -> FavoritesStore {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    FavoritesStore::new(Arc::new(PersistenceAdapter::new(Box::new(SqliteBackend::new(db)))))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn favorites_match_list_model(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut store = fresh_store();
        let mut model: Vec<i64> = Vec::new();

        for op in ops {
            let returned = match op {
                Op::Add(id) => {
                    if !model.contains(&id) {
                        model.push(id);
                    }
                    store.add(movie(id))
                }
                Op::Remove(id) => {
                    model.retain(|m| *m != id);
                    store.remove(id)
                }
                Op::Toggle(id) => {
                    if model.contains(&id) {
                        model.retain(|m| *m != id);
                    } else {
                        model.push(id);
                    }
                    store.toggle(movie(id))
                }
            };
            prop_assert_eq!(returned.ids(), model.clone());
        }

        let listed = store.list().ids();
        let mut deduped = listed.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), listed.len(), "duplicate ids in {:?}", listed);
        prop_assert_eq!(listed, model);
    }

    #[test]
    fn toggle_twice_restores_membership(
        existing in proptest::collection::vec(0i64..20, 0..10),
        id in 0i64..20,
    ) {
        let mut store = fresh_store();
        for e in &existing {
            store.add(movie(*e));
        }
        let before = store.is_favorited(id);

        store.toggle(movie(id));
        prop_assert_eq!(store.is_favorited(id), !before);
        store.toggle(movie(id));
        prop_assert_eq!(store.is_favorited(id), before);
    }

    #[test]
    fn add_makes_favorited(id in any::<i64>(), title in "[a-zA-Z0-9 ]{0,30}") {
        let mut store = fresh_store();
        prop_assert!(!store.is_favorited(id));
        store.add(MovieSummary::new(id, &title));
        prop_assert!(store.is_favorited(id));
    }
}
