use serde::de::DeserializeOwned;

use cinesync_core::MovieId;

use crate::error::CatalogError;
use crate::types::{CatalogMovie, MovieDetails, MovieList};

/// Public TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Max body length echoed into error messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Client for the TMDB catalog API.
pub struct TmdbClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("client", &self.client)
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TmdbClient {
    /// Creates a client authenticating with a v4 read access token.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(token: String, base_url: String) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CatalogError::ClientInit(e.to_string()))?;
        Ok(Self { client, token, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search by title, or list popular movies when `query` is blank.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a movie list.
    pub async fn fetch_movies(&self, query: &str) -> Result<Vec<CatalogMovie>, CatalogError> {
        let query = query.trim();
        let request = if query.is_empty() {
            self.client
                .get(format!("{}/discover/movie", self.base_url))
                .query(&[("sort_by", "popularity.desc")])
        } else {
            self.client.get(format!("{}/search/movie", self.base_url)).query(&[("query", query)])
        };
        let list: MovieList = self.send(request, "movie list").await?;
        tracing::debug!(query, results = list.results.len(), "catalog movies fetched");
        Ok(list.results)
    }

    /// Fetch the full record for one movie.
    ///
    /// # Errors
    /// Returns an error if the request fails, the movie is unknown
    /// (`HttpStatus` 404), or the body cannot be parsed.
    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        let request = self.client.get(format!("{}/movie/{id}", self.base_url));
        self.send(request, "movie details").await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, CatalogError> {
        let response = request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(status = status.as_u16(), context, "catalog request rejected");
            return Err(CatalogError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::JsonParse {
            context: format!("{context} (body: {})", truncate(&body, 200)),
            source: e,
        })
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or(s)
    }
}
