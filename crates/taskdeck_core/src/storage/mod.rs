//! Storage port for the persisted task slot.
//!
//! # Responsibility
//! - Define the raw key/value capability the task repository depends on.
//! - Provide in-memory and SQLite adapters behind the same contract.
//!
//! # Invariants
//! - A slot value is an opaque string; adapters never inspect it.
//! - `write` replaces the whole value in one step or leaves the previous
//!   value untouched.
//! - `read` of a never-written key is `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySlotStorage;
pub use sqlite::SqliteSlotStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage adapter.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Storage disabled, quota exceeded or otherwise refusing access.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot string storage, the local key/value store seen by the core.
pub trait SlotStorage {
    /// Returns the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for &mut S {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}
