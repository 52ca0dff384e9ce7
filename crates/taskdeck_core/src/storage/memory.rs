//! In-memory slot storage.
//!
//! Used by tests and hosts without durable storage. Reads and writes can be
//! switched to fail so callers can exercise disabled-storage paths.

use super::{SlotStorage, StorageError, StorageResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: HashMap<String, String>,
    fail_writes: bool,
    fail_reads: bool,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage with one pre-seeded slot, e.g. a corrupted value.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(key.into(), value.into());
        storage
    }

    /// When set, every `write` fails and leaves stored values untouched.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// When set, every `read` fails.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Raw stored value, bypassing the port.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
