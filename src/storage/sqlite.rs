//! SQLite-backed slots: one row per key in `kv_slots`.

use std::path::Path;

use rusqlite::{params, OptionalExtension};

use super::SlotStorage;
use crate::database::Database;
use crate::services::clock::{Clock, SystemClock};
use crate::types::errors::StorageError;

pub struct SqliteSlotStorage {
    db: Database,
}

impl SqliteSlotStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens (or creates) the slot database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Returns every quarantined value recorded for `key`, oldest first.
    pub fn quarantined(&self, key: &str) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT value FROM kv_quarantine WHERE key = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![key], |row| row.get::<_, String>(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, SystemClock.now_millis()],
        )?;
        Ok(())
    }

    fn quarantine(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "INSERT INTO kv_quarantine (key, value, quarantined_at) VALUES (?1, ?2, ?3)",
            params![key, value, SystemClock.now_millis()],
        )?;
        Ok(())
    }
}
