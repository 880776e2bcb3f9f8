//! Rating Store for MovieDeck.
//!
//! One 0-5 rating per movie, each under its own key (`rating:<id>`).
//! Re-rating overwrites; nothing is averaged.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::adapter::PersistenceAdapter;
use crate::types::errors::StoreError;
use crate::types::movie::MovieId;
use crate::types::rating::Rating;

const RATING_KEY_PREFIX: &str = "rating:";

/// Storage key holding the rating for `id`.
pub fn rating_key(id: MovieId) -> String {
    format!("{}{}", RATING_KEY_PREFIX, id)
}

/// Trait defining rating operations.
pub trait RatingStoreTrait {
    fn get_rating(&self, id: MovieId) -> Rating;
    fn set_rating(&mut self, id: MovieId, value: i64) -> Result<Rating, StoreError>;
}

pub struct RatingStore {
    storage: Arc<PersistenceAdapter>,
}

impl RatingStore {
    pub fn new(storage: Arc<PersistenceAdapter>) -> Self {
        Self { storage }
    }
}

impl RatingStoreTrait for RatingStore {
    /// Returns the stored rating, or zero when unrated.
    ///
    /// A stored value that is not an integer in range is treated as unrated.
    fn get_rating(&self, id: MovieId) -> Rating {
        let key = rating_key(id);
        let Some(value) = self.storage.load(&key) else {
            return Rating::default();
        };
        let parsed = match &value {
            Value::Number(n) => n.as_i64().map(Rating::try_from),
            _ => None,
        };
        match parsed {
            Some(Ok(rating)) => rating,
            _ => {
                let err = StoreError::MalformedData {
                    key,
                    reason: format!("expected an integer between 0 and 5, found {}", value),
                };
                warn!(error = %err, "treating movie as unrated");
                Rating::default()
            }
        }
    }

    /// Stores `value` as the rating for `id`, replacing any earlier rating.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidArgument` if `value` is outside 0..=5; the
    /// previous rating is left untouched.
    fn set_rating(&mut self, id: MovieId, value: i64) -> Result<Rating, StoreError> {
        let rating = Rating::try_from(value)?;
        if let Err(e) = self.storage.save_as(&rating_key(id), &rating) {
            warn!(id, error = %e, "rating kept for this session only");
        }
        debug!(id, rating = rating.value(), "rating set");
        Ok(rating)
    }
}
