use anyhow::Result;
use cinesync_catalog::CatalogMovie;
use cinesync_core::MovieId;
use serde::Serialize;

use super::print_json;
use crate::app::{catalog_client, App};

#[derive(Serialize)]
struct MovieRow<'a> {
    #[serde(flatten)]
    movie: &'a CatalogMovie,
    poster_url: String,
}

/// Query the catalog, then count the search against its first result.
///
/// A failure to count is logged; the results are still printed.
pub(crate) async fn run_search(app: &App, query: &str, limit: usize) -> Result<()> {
    let catalog = catalog_client()?;
    let term = query.trim();
    let movies = catalog.fetch_movies(term).await?;

    if let Some(first) = movies.first().filter(|_| !term.is_empty()) {
        if let Err(e) = app.tracker.record_search(term, &first.snapshot()).await {
            tracing::warn!(term, code = e.code(), error = %e, "failed to record search");
        }
    }

    let rows: Vec<MovieRow<'_>> = movies
        .iter()
        .take(limit)
        .map(|movie| MovieRow { movie, poster_url: movie.poster_url() })
        .collect();
    print_json(&rows)
}

pub(crate) async fn run_details(id: MovieId) -> Result<()> {
    let details = catalog_client()?.movie_details(id).await?;
    print_json(&details)
}
