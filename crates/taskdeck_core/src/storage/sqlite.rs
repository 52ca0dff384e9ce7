//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist named slots in the `storage_slots` table.
//!
//! # Invariants
//! - Each `write` is a single upsert statement, so a failed write never
//!   leaves a partially replaced value behind.
//! - Separate instances over the same file are last-writer-wins.

use super::{SlotStorage, StorageResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable slot storage owning one SQLite connection.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    /// Opens (or creates) the slot store at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO storage_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
