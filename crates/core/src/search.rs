//! Search popularity counter record.

use serde::{Deserialize, Serialize};

use crate::document::{to_fields, Document, Fields};
use crate::error::Result;
use crate::movie::{MovieId, MovieSnapshot};

/// Field names of a counter document.
pub mod counter_fields {
    pub const SEARCH_TERM: &str = "search_term";
    pub const COUNT: &str = "count";
}

/// One counter per distinct search term.
///
/// The movie snapshot is taken from the search that created the counter and
/// is not refreshed by later increments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCounter {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(rename = "search_term")]
    pub term: String,
    pub count: i64,
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: String,
}

impl SearchCounter {
    /// A fresh counter for a never-seen term.
    #[must_use]
    pub fn first_search(term: &str, movie: &MovieSnapshot) -> Self {
        Self {
            id: String::new(),
            term: term.to_owned(),
            count: 1,
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(),
        }
    }

    /// Fields to store for this counter (the id is owned by the store).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_fields(&self) -> Result<Fields> {
        to_fields(self)
    }

    /// Decode a stored counter document.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDocument` if the document is malformed.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let mut counter: Self = doc.decode()?;
        counter.id.clone_from(&doc.id);
        Ok(counter)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_search_counts_one() {
        let movie = MovieSnapshot::new(7, "Dune", None);
        let counter = SearchCounter::first_search("dune", &movie);
        assert_eq!(counter.count, 1);
        assert_eq!(counter.poster_url, "");

        let stored = counter.to_fields().unwrap();
        assert_eq!(stored.get(counter_fields::SEARCH_TERM), Some(&json!("dune")));
        assert!(!stored.contains_key("id"));
    }

    #[test]
    fn test_from_document_takes_store_id() {
        let serde_json::Value::Object(map) = json!({
            "search_term": "alien",
            "count": 4,
            "movie_id": 348,
            "title": "Alien",
            "poster_url": "https://image.tmdb.org/t/p/w500/x.jpg"
        }) else {
            unreachable!()
        };
        let counter = SearchCounter::from_document(&Document::new("c-1".to_owned(), map)).unwrap();
        assert_eq!(counter.id, "c-1");
        assert_eq!(counter.term, "alien");
        assert_eq!(counter.count, 4);
    }
}
