//! Test utilities and module declarations for SQLite store tests.

use cinesync_core::Fields;
use tempfile::TempDir;

use crate::SqliteStore;

#[allow(clippy::unwrap_used, reason = "test code")]
pub fn create_test_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path).unwrap();
    (store, temp_dir)
}

pub fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Fields::new(),
    }
}
