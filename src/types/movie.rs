use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::StoreError;

/// Movie identifiers as issued by the metadata API.
pub type MovieId = i64;

/// Image host used when building poster URLs.
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Minimal movie record kept in the favorites set.
///
/// Fields the core does not interpret (overview, release_date, ...) are kept
/// in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            poster_path: None,
            extra: Map::new(),
        }
    }

    pub fn with_poster(mut self, poster_path: &str) -> Self {
        self.poster_path = Some(poster_path.to_string());
        self
    }

    /// Builds a summary from a raw API result object.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidArgument` if the value is not an object or
    /// has no integer `id`.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| StoreError::InvalidArgument("movie must be a JSON object".to_string()))?;
        match obj.get("id") {
            Some(id) if id.is_i64() || id.is_u64() => {}
            Some(other) => {
                return Err(StoreError::InvalidArgument(format!(
                    "movie id must be an integer, got {}",
                    other
                )))
            }
            None => {
                return Err(StoreError::InvalidArgument(
                    "movie record has no id".to_string(),
                ))
            }
        }
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::InvalidArgument(format!("malformed movie record: {}", e)))
    }

    /// Full poster URL under `base`, or `None` when the movie has no poster.
    pub fn poster_url(&self, base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", base.trim_end_matches('/'), p))
    }
}

/// Ordered favorites, unique by movie id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    movies: Vec<MovieSummary>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    /// Appends `movie` unless its id is already present. Returns whether it was added.
    pub fn insert(&mut self, movie: MovieSummary) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Drops the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        self.movies.len() != before
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieSummary> {
        self.movies.iter()
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|m| m.id).collect()
    }

    pub fn as_slice(&self) -> &[MovieSummary] {
        &self.movies
    }
}

impl FromIterator<MovieSummary> for FavoritesSet {
    /// Collects movies, keeping the first occurrence of each id.
    fn from_iter<I: IntoIterator<Item = MovieSummary>>(iter: I) -> Self {
        let mut set = FavoritesSet::new();
        for movie in iter {
            set.insert(movie);
        }
        set
    }
}

impl<'de> Deserialize<'de> for FavoritesSet {
    /// Reads a JSON array, dropping later repeats of an id.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<MovieSummary>::deserialize(deserializer).map(|movies| movies.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FavoritesSet {
    type Item = &'a MovieSummary;
    type IntoIter = std::slice::Iter<'a, MovieSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}
