//! Storage layer for cinesync
//!
//! Defines the [`RemoteStore`] document contract the sync services depend on,
//! plus two backends: an in-process [`MemoryStore`] and a persistent
//! SQLite-backed [`SqliteStore`] that evaluates queries with `json_extract`.

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StoreBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use storage::SqliteStore;
pub use traits::RemoteStore;
