//! Actor identity: who is performing an operation.
//!
//! The identity provider itself is external; the sync layer only needs the
//! [`IdentityResolver`] contract and a process-stable device id.

use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEVICE_ID_ENV, UNKNOWN_DEVICE_ID};

/// Authenticated account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The party an operation runs on behalf of. Resolved fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    AuthenticatedUser { id: String },
    AnonymousDevice { id: String },
}

impl Actor {
    /// Owner id under which this actor's rows are stored.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::AuthenticatedUser { id } | Self::AnonymousDevice { id } => id,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::AuthenticatedUser { .. })
    }
}

/// Failure to reach or read the identity provider.
///
/// Distinct from "nobody is signed in", which is `Ok(None)`.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("identity session is corrupt: {0}")]
    CorruptSession(String),
}

/// Resolves the current actor.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// The signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError>;

    /// Device id, stable for the lifetime of the process.
    fn stable_device_id(&self) -> &str;
}

static DEVICE_ID: OnceLock<String> = OnceLock::new();

const MACHINE_ID_PATHS: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Process-wide device id.
///
/// Derived once on first use and never rotated: `CINESYNC_DEVICE_ID` if set,
/// otherwise the platform machine id, otherwise [`UNKNOWN_DEVICE_ID`].
pub fn device_id() -> &'static str {
    DEVICE_ID.get_or_init(|| {
        let id = derive_device_id(
            std::env::var(DEVICE_ID_ENV).ok(),
            MACHINE_ID_PATHS.iter().filter_map(|p| std::fs::read_to_string(p).ok()),
        );
        if id == UNKNOWN_DEVICE_ID {
            tracing::warn!("no stable device id available, using shared sentinel");
        } else {
            tracing::debug!(device_id = %id, "device id resolved");
        }
        id
    })
}

fn derive_device_id(
    override_id: Option<String>,
    platform_ids: impl IntoIterator<Item = String>,
) -> String {
    override_id
        .into_iter()
        .chain(platform_ids)
        .map(|s| s.trim().to_owned())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_DEVICE_ID.to_owned())
}
