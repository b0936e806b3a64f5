use serde::{Deserialize, Serialize};

use crate::constants::IMAGE_BASE_URL;

/// Catalog identifier of a movie.
pub type MovieId = i64;

/// The slice of a catalog movie that the sync layer keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSnapshot {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
}

impl MovieSnapshot {
    pub fn new(id: MovieId, title: impl Into<String>, poster_path: Option<String>) -> Self {
        Self { id, title: title.into(), poster_path }
    }

    /// Displayable poster URL for this movie, empty when it has no poster.
    #[must_use]
    pub fn poster_url(&self) -> String {
        poster_url(self.poster_path.as_deref())
    }
}

/// Materialize a catalog poster path into a displayable URL.
///
/// Pure concatenation with [`IMAGE_BASE_URL`]; a missing or empty path yields
/// an empty string.
#[must_use]
pub fn poster_url(path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}{p}"),
        _ => String::new(),
    }
}
