//! Repository pattern for namespaced record storage.

use crate::db::error::DbError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Whole-document storage addressed by namespace.
pub trait KeyValueStore {
    /// Stored payload for `namespace`, or `None` if nothing was ever written.
    fn get(&self, namespace: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `namespace`.
    fn put(&self, namespace: &str, payload: &str) -> Result<()>;
}

/// SQLite implementation of the key-value store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating it and its parent directory if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn
            .pragma_update(None, "user_version", super::schema::SCHEMA_VERSION)?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, namespace: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT payload FROM kv_records WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn put(&self, namespace: &str, payload: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_records (namespace, payload, updated_at) VALUES (?1, ?2, ?3)",
            params![namespace, payload, now],
        )?;
        Ok(())
    }
}
