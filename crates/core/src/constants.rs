//! Shared constants for cinesync.
//!
//! Centralizes values that would otherwise be duplicated across crates.

/// Image CDN prefix that turns a catalog poster path into a displayable URL.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Number of counters returned by a trending read when the caller does not say.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Maximum number of results for any query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Device id used when the platform cannot supply a stable one.
///
/// Every device without a real id shares this value.
pub const UNKNOWN_DEVICE_ID: &str = "unknown-device";

/// Default collection holding one counter document per search term.
pub const DEFAULT_SEARCH_COLLECTION: &str = "search_metrics";

/// Default collection holding saved-movie documents.
pub const DEFAULT_SAVED_COLLECTION: &str = "saved_movies";

/// Environment override for the device id.
pub const DEVICE_ID_ENV: &str = "CINESYNC_DEVICE_ID";
