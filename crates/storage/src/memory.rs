//! In-process document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cinesync_core::{Document, Fields, Query};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::RemoteStore;

/// Document store held in memory.
///
/// Documents keep insertion order, which is also the tie-break order for
/// equal sort keys. Clones share the same underlying collections.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections.read().await.get(collection).map_or(0, Vec::len)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

fn not_found(collection: &str, id: &str) -> StorageError {
    StorageError::NotFound { collection: collection.to_owned(), id: id.to_owned() }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StorageError> {
        let guard = self.collections.read().await;
        let mut docs: Vec<Document> = guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| query.matches(d)).cloned().collect())
            .unwrap_or_default();
        drop(guard);

        if let Some(order) = &query.order {
            docs.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StorageError> {
        let doc = Document::new(uuid::Uuid::new_v4().to_string(), fields);
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        let mut guard = self.collections.write().await;
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| not_found(collection, id))?;
        doc.fields.extend(fields);
        Ok(doc.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        let mut guard = self.collections.write().await;
        let docs = guard.get_mut(collection).ok_or_else(|| not_found(collection, id))?;
        let pos = docs.iter().position(|d| d.id == id).ok_or_else(|| not_found(collection, id))?;
        docs.remove(pos);
        Ok(())
    }
}
