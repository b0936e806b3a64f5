//! Typed error enum for the storage layer.
//!
//! Every backend maps its failures into these variants so callers can match
//! on not-found, corrupt data, or transient backend failures instead of
//! downcasting opaque boxes.

use cinesync_core::CoreError;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Document id not present in the collection.
    #[error("not found: {collection} document {id}")]
    NotFound { collection: String, id: String },

    /// Query cannot be expressed against the backend.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// SQL / connection failure.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Connection pool exhausted or misconfigured.
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Stored data could not be decoded into a domain record.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// Backend is unreachable (used by remote and test backends).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying by the caller).
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Pool(_) => true,
            #[cfg(feature = "sqlite")]
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            Self::Unavailable(_) => true,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        Self::DataCorruption { context: "document decode".to_owned(), source: Box::new(err) }
    }
}
