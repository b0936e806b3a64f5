mod migration;

#[cfg(test)]
mod registry_tests;

use std::sync::Arc;

use chrono::Utc;
use cinesync_core::{
    saved_fields, MovieId, MovieSnapshot, Order, Predicate, Query, SavedItem, Settings,
};
use cinesync_storage::RemoteStore;

use crate::{AuthGate, ServiceError};

pub use migration::{MigrationReport, RowFailure};

/// Movies saved per owner.
///
/// Every operation resolves the actor through [`AuthGate::require_actor`]
/// first and is scoped to that actor's id: the signed-in user, or this
/// device when nobody is signed in. Anonymous rows move to the user on
/// sign-in via [`migrate_anonymous_to_user`](Self::migrate_anonymous_to_user).
pub struct SavedItemRegistry {
    pub(crate) store: Arc<dyn RemoteStore>,
    pub(crate) gate: AuthGate,
    pub(crate) collection: String,
}

impl SavedItemRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, gate: AuthGate, settings: &Settings) -> Self {
        Self { store, gate, collection: settings.saved_collection.clone() }
    }

    /// Save `movie` for the current actor.
    ///
    /// Idempotent: if the actor already saved it, the existing row is
    /// returned unchanged.
    pub async fn save(&self, movie: &MovieSnapshot) -> Result<SavedItem, ServiceError> {
        let actor = self.gate.require_actor().await?;
        let owner_id = actor.id();

        if let Some(existing) = self.find(owner_id, movie.id).await? {
            tracing::debug!(owner_id, movie_id = movie.id, "movie already saved");
            return Ok(existing);
        }

        let item = SavedItem::new(owner_id, movie, Utc::now().timestamp_millis());
        let doc = self.store.create(&self.collection, item.to_fields()?).await?;
        tracing::info!(
            owner_id,
            movie_id = movie.id,
            authenticated = actor.is_authenticated(),
            "movie saved"
        );
        Ok(SavedItem::from_document(&doc)?)
    }

    /// Unsave `movie_id`. Returns `false` when it was not saved.
    pub async fn remove(&self, movie_id: MovieId) -> Result<bool, ServiceError> {
        let actor = self.gate.require_actor().await?;
        let Some(existing) = self.find(actor.id(), movie_id).await? else {
            return Ok(false);
        };
        self.store.delete(&self.collection, &existing.id).await?;
        tracing::info!(owner_id = actor.id(), movie_id, "movie unsaved");
        Ok(true)
    }

    pub async fn is_saved(&self, movie_id: MovieId) -> Result<bool, ServiceError> {
        let actor = self.gate.require_actor().await?;
        Ok(self.find(actor.id(), movie_id).await?.is_some())
    }

    /// All movies saved by the current actor, newest first.
    pub async fn list(&self) -> Result<Vec<SavedItem>, ServiceError> {
        let actor = self.gate.require_actor().await?;
        let query = owner_query(actor.id()).order_by(Order::desc(saved_fields::CREATED_AT));
        let docs = self.store.query(&self.collection, &query).await?;
        docs.iter().map(|doc| SavedItem::from_document(doc).map_err(ServiceError::from)).collect()
    }

    /// The row for `(owner_id, movie_id)`, if any.
    pub(crate) async fn find(
        &self,
        owner_id: &str,
        movie_id: MovieId,
    ) -> Result<Option<SavedItem>, ServiceError> {
        let query =
            owner_query(owner_id).filter(Predicate::eq(saved_fields::MOVIE_ID, movie_id)).limit(1);
        let docs = self.store.query(&self.collection, &query).await?;
        docs.first().map(SavedItem::from_document).transpose().map_err(ServiceError::from)
    }
}

fn owner_query(owner_id: &str) -> Query {
    Query::new().filter(Predicate::eq(saved_fields::OWNER_ID, owner_id))
}
