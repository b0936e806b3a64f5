//! Unified store backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use cinesync_core::{Document, Fields, Query};

use crate::error::StorageError;
use crate::traits::RemoteStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StoreBackend::Memory(s) => <crate::MemoryStore as RemoteStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite(s) => <crate::SqliteStore as RemoteStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StoreBackend {
    Memory(crate::MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStore),
}

impl StoreBackend {
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(crate::MemoryStore::new())
    }

    /// # Errors
    /// Returns error if the database cannot be opened or migrated.
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteStore::new(db_path)?))
    }
}

#[async_trait]
impl RemoteStore for StoreBackend {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StorageError> {
        dispatch!(self, query(collection, query))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StorageError> {
        dispatch!(self, create(collection, fields))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        dispatch!(self, update(collection, id, fields))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        dispatch!(self, delete(collection, id))
    }
}
