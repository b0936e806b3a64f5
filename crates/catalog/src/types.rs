//! Catalog response payloads.

use cinesync_core::{poster_url, MovieId, MovieSnapshot};
use serde::{Deserialize, Serialize};

/// A movie as listed by search and discover endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl CatalogMovie {
    #[must_use]
    pub fn snapshot(&self) -> MovieSnapshot {
        MovieSnapshot::from(self)
    }

    #[must_use]
    pub fn poster_url(&self) -> String {
        poster_url(self.poster_path.as_deref())
    }
}

impl From<&CatalogMovie> for MovieSnapshot {
    fn from(movie: &CatalogMovie) -> Self {
        Self::new(movie.id, movie.title.clone(), movie.poster_path.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full movie record from the details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<&MovieDetails> for MovieSnapshot {
    fn from(details: &MovieDetails) -> Self {
        Self::new(details.id, details.title.clone(), details.poster_path.clone())
    }
}

/// Envelope of list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct MovieList {
    #[serde(default)]
    pub(crate) results: Vec<CatalogMovie>,
}
