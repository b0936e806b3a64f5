//! TMDB catalog client: movie search, popular listing and details.

mod client;
pub mod error;
mod types;

#[cfg(test)]
mod tests;

pub use client::{TmdbClient, DEFAULT_BASE_URL};
pub use error::CatalogError;
pub use types::{CatalogMovie, Genre, MovieDetails};
