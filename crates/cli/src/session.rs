//! File-backed identity: the signed-in user lives in a small JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cinesync_core::{device_id, IdentityError, IdentityResolver, UserProfile};

/// Identity resolver reading the local session file on every call.
#[derive(Debug, Clone)]
pub(crate) struct LocalSessionIdentity {
    path: PathBuf,
}

impl LocalSessionIdentity {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) async fn sign_in(&self, user: &UserProfile) -> Result<(), IdentityError> {
        let json = serde_json::to_string_pretty(user)
            .map_err(|e| IdentityError::CorruptSession(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        tracing::info!(user_id = %user.id, "signed in");
        Ok(())
    }

    /// Remove the session. Returns `false` if nobody was signed in.
    pub(crate) async fn sign_out(&self) -> Result<bool, IdentityError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(IdentityError::Unavailable(e.to_string())),
        }
    }
}

#[async_trait]
impl IdentityResolver for LocalSessionIdentity {
    async fn current_user(&self) -> Result<Option<UserProfile>, IdentityError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(IdentityError::Unavailable(e.to_string())),
        };
        let user: UserProfile = serde_json::from_str(&raw).map_err(|e| {
            IdentityError::CorruptSession(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(user))
    }

    fn stable_device_id(&self) -> &str {
        device_id()
    }
}
