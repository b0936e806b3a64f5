use std::sync::Arc;

use cinesync_core::{Actor, IdentityResolver, UserProfile};

use crate::ServiceError;

/// Resolves who an operation runs for, before the operation touches the store.
///
/// Nothing is cached: each call asks the resolver again, so a sign-in or
/// sign-out between two calls is always observed.
#[derive(Clone)]
pub struct AuthGate {
    identity: Arc<dyn IdentityResolver>,
}

impl AuthGate {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityResolver>) -> Self {
        Self { identity }
    }

    /// The signed-in user, or `AuthRequired`.
    pub async fn require_user(&self) -> Result<UserProfile, ServiceError> {
        match self.identity.current_user().await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("strict operation refused: nobody is signed in");
                Err(ServiceError::AuthRequired)
            },
        }
    }

    /// The signed-in user, falling back to this device when nobody is.
    ///
    /// A resolver failure is returned as `IdentityUnavailable`; it never
    /// degrades into the anonymous actor.
    pub async fn require_actor(&self) -> Result<Actor, ServiceError> {
        let actor = match self.identity.current_user().await? {
            Some(user) => Actor::AuthenticatedUser { id: user.id },
            None => Actor::AnonymousDevice { id: self.device_id().to_owned() },
        };
        Ok(actor)
    }

    /// Owner id used for anonymous rows on this device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        self.identity.stable_device_id()
    }
}
