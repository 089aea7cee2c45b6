//! SQLite-backed slot store.
//!
//! # Responsibility
//! - Persist named slots in the migrated `slots` table.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - The connection has already been bootstrapped via `db::open_db` /
//!   `db::open_db_in_memory` (migrations applied).
//! - One row per slot key; `set` is an upsert.

use crate::store::{NoteStore, SecretStore, StoreError, StoreResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable slot store over a bootstrapped SQLite connection.
///
/// Implements both [`SecretStore`] and [`NoteStore`]; clone it to hand the
/// same database to several services.
#[derive(Clone)]
pub struct SqliteSlotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSlotStore {
    /// Wraps a connection returned by the `db` bootstrap functions.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn select(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.query_row(
            "SELECT value FROM slots WHERE key = ?1;",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(into_store_error)
    }

    fn upsert(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )
        .map_err(into_store_error)?;
        Ok(())
    }
}

fn into_store_error(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl SecretStore for SqliteSlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.select(key)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.upsert(key, value)
    }
}

#[async_trait]
impl NoteStore for SqliteSlotStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.select(key)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.upsert(key, value)
    }
}
