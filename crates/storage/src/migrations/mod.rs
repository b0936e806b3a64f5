#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod v1;
mod v2;

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 2;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Document store schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: documents table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: lookup indexes for counters and saved movies");
        conn.execute_batch(v2::SQL)?;
    }

    if current_version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}
