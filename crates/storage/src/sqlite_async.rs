//! Async `RemoteStore` implementation for `SqliteStore` via `spawn_blocking`.

use async_trait::async_trait;
use cinesync_core::{Document, Fields, Query};

use crate::error::StorageError;
use crate::traits::RemoteStore;
use crate::SqliteStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@val arg`: move directly (owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture val $arg:ident) => { };
    (@pass str $arg:ident) => { &$arg };
    (@pass ref $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl RemoteStore for SqliteStore {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StorageError> {
        delegate!(self, query_documents, @str collection, @ref query)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StorageError> {
        delegate!(self, create_document, @str collection, @val fields)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        delegate!(self, update_document, @str collection, @str id, @val fields)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        delegate!(self, delete_document, @str collection, @str id)
    }
}
