use chrono::Utc;
use cinesync_core::{Document, Fields, Query};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, OptionalExtension};
use serde_json::Value;

use super::{get_conn, SqliteStore};
use crate::error::StorageError;

/// JSON path for a top-level field. Field names are restricted to
/// `[A-Za-z0-9_]` so they always address a single key.
fn json_path(field: &str) -> Result<String, StorageError> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StorageError::InvalidQuery(format!("unsupported field name: {field:?}")));
    }
    Ok(format!("$.{field}"))
}

/// Map a JSON scalar to the value `json_extract` yields for it.
/// `None` means SQL NULL.
fn sql_value(value: &Value) -> Result<Option<SqlValue>, StorageError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(SqlValue::Integer(i64::from(*b)))),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .map(Some)
            .ok_or_else(|| StorageError::InvalidQuery(format!("unsupported number: {n}"))),
        Value::String(s) => Ok(Some(SqlValue::Text(s.clone()))),
        Value::Array(_) | Value::Object(_) => Err(StorageError::InvalidQuery(
            "only scalar values can be compared".to_owned(),
        )),
    }
}

/// Build the SELECT for `query` with numbered parameters.
///
/// Paths are inlined as literals (field names are validated by `json_path`)
/// so the expression indexes from migration v2 can be used.
pub(crate) fn build_select(
    collection: &str,
    query: &Query,
) -> Result<(String, Vec<SqlValue>), StorageError> {
    let mut sql = String::from("SELECT id, fields FROM documents WHERE collection = ?1");
    let mut values = vec![SqlValue::Text(collection.to_owned())];

    for predicate in &query.predicates {
        let path = json_path(&predicate.field)?;
        match sql_value(&predicate.value)? {
            None => sql.push_str(&format!(" AND json_extract(fields, '{path}') IS NULL")),
            Some(v) => {
                values.push(v);
                sql.push_str(&format!(" AND json_extract(fields, '{path}') = ?{}", values.len()));
            },
        }
    }

    // seq keeps ties in insertion order
    if let Some(order) = &query.order {
        sql.push_str(&format!(
            " ORDER BY json_extract(fields, '{}') {}, seq ASC",
            json_path(&order.field)?,
            order.direction.as_str()
        ));
    } else {
        sql.push_str(" ORDER BY seq ASC");
    }

    if let Some(limit) = query.limit {
        values.push(SqlValue::Integer(limit as i64));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));
    }

    Ok((sql, values))
}

fn parse_fields(raw: &str) -> Result<Fields, StorageError> {
    Ok(serde_json::from_str(raw)?)
}

fn not_found(collection: &str, id: &str) -> StorageError {
    StorageError::NotFound { collection: collection.to_owned(), id: id.to_owned() }
}

impl SqliteStore {
    /// Run an equality/order/limit query against one collection.
    ///
    /// # Errors
    /// Returns error if the query is unsupported, the database query fails,
    /// or a stored row is not a JSON object.
    pub fn query_documents(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Document>, StorageError> {
        let (sql, values) = build_select(collection, query)?;
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, raw) = row?;
            docs.push(Document::new(id, parse_fields(&raw)?));
        }
        tracing::debug!(collection, returned = docs.len(), "documents queried");
        Ok(docs)
    }

    /// Insert a document under a fresh id.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO documents (collection, id, fields, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, serde_json::to_string(&fields)?, now],
        )?;
        Ok(Document::new(id, fields))
    }

    /// Merge fields into an existing document.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, or error if the database write fails.
    pub fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT fields FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw) = existing else {
            return Err(not_found(collection, id));
        };

        let mut merged = parse_fields(&raw)?;
        merged.extend(fields);
        tx.execute(
            "UPDATE documents SET fields = ?1, updated_at = ?2 WHERE collection = ?3 AND id = ?4",
            params![serde_json::to_string(&merged)?, Utc::now().to_rfc3339(), collection, id],
        )?;
        tx.commit()?;

        Ok(Document::new(id.to_owned(), merged))
    }

    /// Delete a document.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, or error if the database delete fails.
    pub fn delete_document(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let affected = conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        if affected == 0 {
            return Err(not_found(collection, id));
        }
        Ok(())
    }
}
