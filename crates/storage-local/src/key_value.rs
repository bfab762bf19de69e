//! String key/value storage over a single SQLite connection.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::db;
use crate::errors::{Result, StorageError};

/// Thread-safe key/value store; access is serialized through one connection.
pub struct KeyValueStore {
    conn: Mutex<Connection>,
}

impl KeyValueStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_connection(db::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(db::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.remove_items(&[key])
    }

    /// Removes several keys in one transaction.
    pub fn remove_items(&self, keys: &[&str]) -> Result<()> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        for key in keys {
            let removed = tx.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
            debug!("Removed local storage key '{}' ({} row)", key, removed);
        }
        tx.commit()?;
        Ok(())
    }
}
