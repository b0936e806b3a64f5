//! `SQLite` document store.
//!
//! One `documents` table holds every collection; each row is an id plus a
//! JSON object of fields. All methods are synchronous; the async
//! [`RemoteStore`](crate::RemoteStore) impl lives in `sqlite_async`.

// SQLite uses i64 for limits, Rust uses usize - conversions are bounded by MAX_QUERY_LIMIT
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    reason = "query limits are clamped well below i64::MAX"
)]

pub(crate) mod documents;

use std::path::Path;

use cinesync_core::env_parse_with_default;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Document store wrapping a `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("CINESYNC_DB_POOL_SIZE", 8_u32).max(1)
}

impl SqliteStore {
    /// Open (or create) the store at `db_path` and run pending migrations.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn)
            .map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(
            pool_size = pool_size,
            path = %db_path.display(),
            "Document store initialized with connection pool"
        );

        Ok(Self { pool })
    }
}
