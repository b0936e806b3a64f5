//! Remote document store contract.
//!
//! The services never talk to a concrete database; they depend on this trait,
//! which mirrors what a hosted document collection offers: equality/order/limit
//! queries and create/update/delete by id. There are no transactions, so
//! read-then-write sequences built on top of it can race.

use std::sync::Arc;

use async_trait::async_trait;
use cinesync_core::{Document, Fields, Query};

use crate::error::StorageError;

/// Document collection operations.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Documents in `collection` matching every predicate, ordered and limited.
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StorageError>;

    /// Create a document. The store assigns the id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StorageError>;

    /// Merge `fields` into an existing document and return the result.
    ///
    /// Fails with `NotFound` for an unknown id.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError>;

    /// Delete a document. Fails with `NotFound` for an unknown id.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StorageError> {
        (**self).query(collection, query).await
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StorageError> {
        (**self).create(collection, fields).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        (**self).update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        (**self).delete(collection, id).await
    }
}
