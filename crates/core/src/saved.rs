//! Saved-movie record.

use serde::{Deserialize, Serialize};

use crate::document::{to_fields, Document, Fields};
use crate::error::Result;
use crate::movie::{MovieId, MovieSnapshot};

/// Field names of a saved-movie document.
pub mod saved_fields {
    pub const OWNER_ID: &str = "owner_id";
    pub const MOVIE_ID: &str = "movie_id";
    pub const CREATED_AT: &str = "created_at";
}

/// A movie saved by exactly one owner (a user id or a device id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub owner_id: String,
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl SavedItem {
    #[must_use]
    pub fn new(owner_id: &str, movie: &MovieSnapshot, created_at: i64) -> Self {
        Self {
            id: String::new(),
            owner_id: owner_id.to_owned(),
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(),
            created_at,
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_fields(&self) -> Result<Fields> {
        to_fields(self)
    }

    /// # Errors
    /// Returns `CoreError::InvalidDocument` if the document is malformed.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let mut item: Self = doc.decode()?;
        item.id.clone_from(&doc.id);
        Ok(item)
    }
}
