//! Moving anonymous device rows to a signed-in user.

use cinesync_core::{saved_fields, Document, Fields, MovieId, SavedItem};
use serde_json::Value;

use super::{owner_query, SavedItemRegistry};
use crate::ServiceError;

/// A source row that could not be moved.
#[derive(Debug)]
pub struct RowFailure {
    pub document_id: String,
    /// `None` when the row itself could not be decoded.
    pub movie_id: Option<MovieId>,
    pub error: ServiceError,
}

/// Outcome of a migration. Rows in `conflicts` and `failures` stay with the
/// device.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: usize,
    /// Movies the target user had already saved.
    pub conflicts: Vec<MovieId>,
    pub failures: Vec<RowFailure>,
}

impl MigrationReport {
    #[must_use]
    pub fn not_migrated(&self) -> usize {
        self.conflicts.len().saturating_add(self.failures.len())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.not_migrated() == 0
    }
}

enum RowOutcome {
    Migrated,
    Conflict(MovieId),
}

impl SavedItemRegistry {
    /// Rewrite the owner of every row saved under this device to
    /// `new_owner_id`, one row at a time.
    ///
    /// Best effort: a row whose target already has that movie is left in
    /// place and listed in `conflicts`; a row that fails is left in place and
    /// listed in `failures`. Only a failure to list the device's rows is
    /// returned as an error.
    pub async fn migrate_anonymous_to_user(
        &self,
        new_owner_id: &str,
    ) -> Result<MigrationReport, ServiceError> {
        if new_owner_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("target owner id is empty".to_owned()));
        }
        let source_id = self.gate.device_id();
        if source_id == new_owner_id {
            return Ok(MigrationReport::default());
        }

        let rows = self.store.query(&self.collection, &owner_query(source_id)).await?;
        let mut report = MigrationReport::default();

        for doc in &rows {
            match self.migrate_row(doc, new_owner_id).await {
                Ok(RowOutcome::Migrated) => report.migrated = report.migrated.saturating_add(1),
                Ok(RowOutcome::Conflict(movie_id)) => {
                    tracing::warn!(
                        movie_id,
                        target = new_owner_id,
                        "target already saved this movie, leaving device row in place"
                    );
                    report.conflicts.push(movie_id);
                },
                Err(error) => {
                    tracing::warn!(id = %doc.id, error = %error, "saved row migration failed");
                    report.failures.push(RowFailure {
                        document_id: doc.id.clone(),
                        movie_id: doc.get(saved_fields::MOVIE_ID).and_then(Value::as_i64),
                        error,
                    });
                },
            }
        }

        tracing::info!(
            source = source_id,
            target = new_owner_id,
            found = rows.len(),
            migrated = report.migrated,
            conflicts = report.conflicts.len(),
            failures = report.failures.len(),
            "anonymous saved movies migrated"
        );
        Ok(report)
    }

    /// Migrate this device's rows to the signed-in user.
    ///
    /// Strict: fails with `AuthRequired` and touches nothing when nobody is
    /// signed in.
    pub async fn migrate_after_sign_in(&self) -> Result<MigrationReport, ServiceError> {
        let user = self.gate.require_user().await?;
        self.migrate_anonymous_to_user(&user.id).await
    }

    async fn migrate_row(
        &self,
        doc: &Document,
        new_owner_id: &str,
    ) -> Result<RowOutcome, ServiceError> {
        let item = SavedItem::from_document(doc)?;
        if self.find(new_owner_id, item.movie_id).await?.is_some() {
            return Ok(RowOutcome::Conflict(item.movie_id));
        }

        let mut patch = Fields::new();
        patch.insert(saved_fields::OWNER_ID.to_owned(), Value::from(new_owner_id));
        self.store.update(&self.collection, &doc.id, patch).await?;
        Ok(RowOutcome::Migrated)
    }
}
