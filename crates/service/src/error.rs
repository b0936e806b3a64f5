//! Typed error enum for the service layer.
//!
//! Every failure a caller can see maps to one of four stable codes, so a UI
//! can branch on `code()` without string matching.

use cinesync_core::{CoreError, IdentityError};
use cinesync_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A strict operation ran with nobody signed in.
    #[error("authentication required")]
    AuthRequired,

    /// The remote store failed a required read or write.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    /// The identity provider could not say who the actor is.
    #[error("identity unavailable: {0}")]
    IdentityUnavailable(#[from] IdentityError),

    /// Caller provided invalid input (empty term, empty owner id).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::IdentityUnavailable(_) => "IDENTITY_UNAVAILABLE",
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::StoreUnavailable(e) => e.is_transient(),
            Self::IdentityUnavailable(IdentityError::Unavailable(_)) => true,
            _ => false,
        }
    }

    pub const fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => Self::InvalidInput(msg),
            // a stored row that does not decode is a store-side fault
            other => Self::StoreUnavailable(other.into()),
        }
    }
}
