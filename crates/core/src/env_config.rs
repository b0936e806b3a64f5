//! Environment variable parsing with warn-level logging for invalid values.

use crate::constants::{
    DEFAULT_SAVED_COLLECTION, DEFAULT_SEARCH_COLLECTION, DEFAULT_TRENDING_LIMIT, MAX_QUERY_LIMIT,
};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a string environment variable, treating empty values as unset.
fn env_string_with_default(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Runtime settings for the sync layer.
///
/// Built once by the entry point and handed to each component; nothing in
/// the library reads the environment behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Collection holding search counters.
    pub search_collection: String,
    /// Collection holding saved movies.
    pub saved_collection: String,
    /// Trending size used when the caller does not pass one.
    pub trending_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_collection: DEFAULT_SEARCH_COLLECTION.to_owned(),
            saved_collection: DEFAULT_SAVED_COLLECTION.to_owned(),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl Settings {
    /// Load settings from `CINESYNC_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let raw_limit = env_parse_with_default("CINESYNC_TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT);
        let trending_limit = raw_limit.clamp(1, MAX_QUERY_LIMIT);
        if trending_limit != raw_limit {
            tracing::warn!(
                original = raw_limit,
                clamped = trending_limit,
                "CINESYNC_TRENDING_LIMIT clamped to [1, {MAX_QUERY_LIMIT}]"
            );
        }
        Self {
            search_collection: env_string_with_default(
                "CINESYNC_SEARCH_COLLECTION",
                DEFAULT_SEARCH_COLLECTION,
            ),
            saved_collection: env_string_with_default(
                "CINESYNC_SAVED_COLLECTION",
                DEFAULT_SAVED_COLLECTION,
            ),
            trending_limit,
        }
    }
}
