//! Task repository contract and slot-backed implementation.
//!
//! # Responsibility
//! - Provide CRUD over the JSON task array stored in one named slot.
//! - Make the read-modify-write cycle an explicit transaction.
//!
//! # Invariants
//! - `create` prepends; stored order is newest-created first.
//! - `create` does not check id uniqueness; callers own that contract.
//! - A transaction writes at most once, on `commit`, and only if it changed
//!   something.
//! - A failed write leaves the previously stored slot value in place.
//! - A slot that cannot be read or decoded is never overwritten: `list`
//!   degrades to empty, but `begin` refuses to start a transaction.

use crate::config::{StoreConfig, DEFAULT_STORAGE_KEY};
use crate::model::task::Task;
use crate::storage::{SlotStorage, StorageError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of a mutating repository call.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Encode(serde_json::Error),
    /// The stored slot could not be read.
    Read(StorageError),
    /// The stored slot holds a value that does not decode as tasks.
    Decode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Read(err) => write!(f, "failed to read stored tasks: {err}"),
            Self::Decode(err) => write!(f, "stored tasks are unreadable: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Read(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Returns the stored collection, or empty when absent/unreadable.
    fn list(&self) -> Vec<Task>;
    fn create(&mut self, task: &Task) -> RepoResult<()>;
    /// Replaces the entry with the same id; no match is a no-op.
    fn update(&mut self, task: &Task) -> RepoResult<()>;
    fn delete(&mut self, id: &str) -> RepoResult<()>;
    fn toggle_completion(&mut self, id: &str) -> RepoResult<()>;

    fn get(&self, id: &str) -> Option<Task> {
        self.list().into_iter().find(|task| task.id == id)
    }
}

/// Task repository storing the whole collection as JSON in one slot.
pub struct SlotTaskRepository<S: SlotStorage> {
    storage: S,
    key: String,
}

impl<S: SlotStorage> SlotTaskRepository<S> {
    /// Uses the default slot name.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        Self::with_key(storage, config.storage_key.clone())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Acquires the slot for writing and loads the current collection.
    ///
    /// The exclusive borrow is the single-writer guarantee: no other
    /// operation on this repository can run until the transaction is
    /// committed or dropped.
    ///
    /// Fails with [`RepoError::Read`] or [`RepoError::Decode`] when the
    /// current slot value cannot be loaded, so that a commit can never
    /// replace tasks it did not see.
    pub fn begin(&mut self) -> RepoResult<TaskTransaction<'_, S>> {
        let tasks = match load_tasks(&self.storage, &self.key) {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=task_begin module=repo status=refused error_code=slot_unreadable error={}",
                    err
                );
                return Err(err);
            }
        };
        Ok(TaskTransaction {
            storage: &mut self.storage,
            key: &self.key,
            tasks,
            changed: false,
        })
    }
}

impl<S: SlotStorage> TaskRepository for SlotTaskRepository<S> {
    fn list(&self) -> Vec<Task> {
        load_tasks(&self.storage, &self.key).unwrap_or_default()
    }

    fn create(&mut self, task: &Task) -> RepoResult<()> {
        let mut tx = self.begin()?;
        tx.prepend(task.clone());
        tx.commit()
    }

    fn update(&mut self, task: &Task) -> RepoResult<()> {
        let mut tx = self.begin()?;
        tx.replace(task.clone());
        tx.commit()
    }

    fn delete(&mut self, id: &str) -> RepoResult<()> {
        let mut tx = self.begin()?;
        tx.remove(id);
        tx.commit()
    }

    fn toggle_completion(&mut self, id: &str) -> RepoResult<()> {
        let mut tx = self.begin()?;
        tx.toggle(id);
        tx.commit()
    }
}

/// One read-modify-write cycle over the task slot.
///
/// Dropping a transaction without `commit` discards its changes.
pub struct TaskTransaction<'repo, S: SlotStorage> {
    storage: &'repo mut S,
    key: &'repo str,
    tasks: Vec<Task>,
    changed: bool,
}

impl<S: SlotStorage> TaskTransaction<'_, S> {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Raw mutable access; always marks the transaction as changed.
    pub fn tasks_mut(&mut self) -> &mut Vec<Task> {
        self.changed = true;
        &mut self.tasks
    }

    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.changed = true;
    }

    /// Returns whether an entry with the same id was replaced.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|stored| stored.id == task.id) {
            Some(stored) => {
                *stored = task;
                self.changed = true;
                true
            }
            None => false,
        }
    }

    /// Returns whether any entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.changed |= removed;
        removed
    }

    /// Returns whether a matching entry was toggled.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.toggle_completion();
                self.changed = true;
                true
            }
            None => false,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Writes the whole collection back if anything changed.
    pub fn commit(self) -> RepoResult<()> {
        if !self.changed {
            debug!("event=task_commit module=repo status=skipped reason=unchanged");
            return Ok(());
        }

        let encoded = serde_json::to_string(&self.tasks)?;
        match self.storage.write(self.key, &encoded) {
            Ok(()) => {
                debug!(
                    "event=task_commit module=repo status=ok task_count={}",
                    self.tasks.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=task_commit module=repo status=error error_code=slot_write_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Loads the slot; an absent slot is an empty collection.
fn load_tasks<S: SlotStorage>(storage: &S, key: &str) -> RepoResult<Vec<Task>> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(Vec::new()),
        Err(err) => {
            warn!(
                "event=task_load module=repo status=degraded error_code=slot_read_failed error={}",
                err
            );
            return Err(RepoError::Read(err));
        }
    };

    serde_json::from_str::<Vec<Task>>(&raw).map_err(|err| {
        // Payload is user data; log only its size and the parse position.
        warn!(
            "event=task_load module=repo status=degraded error_code=slot_corrupted bytes={} line={} column={}",
            raw.len(),
            err.line(),
            err.column()
        );
        RepoError::Decode(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{RepoError, SlotTaskRepository, TaskRepository};
    use crate::model::category::Category;
    use crate::model::task::Task;
    use crate::storage::MemorySlotStorage;
    use chrono::{TimeZone, Utc};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            category: Category::Other,
            deadline: Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn dropped_transaction_writes_nothing() {
        let mut repo = SlotTaskRepository::new(MemorySlotStorage::new());
        {
            let mut tx = repo.begin().unwrap();
            tx.prepend(task("a"));
            assert!(tx.is_changed());
        }
        assert!(repo.list().is_empty());
        assert_eq!(repo.storage().raw(repo.key()), None);
    }

    #[test]
    fn unchanged_transaction_skips_the_write() {
        let mut repo = SlotTaskRepository::new(MemorySlotStorage::new());
        let mut tx = repo.begin().unwrap();
        assert!(!tx.toggle("missing"));
        assert!(!tx.remove("missing"));
        tx.commit().unwrap();
        assert_eq!(repo.storage().raw(repo.key()), None);
    }

    #[test]
    fn transaction_batches_several_mutations_into_one_write() {
        let mut repo = SlotTaskRepository::new(MemorySlotStorage::new());
        let mut tx = repo.begin().unwrap();
        tx.prepend(task("a"));
        tx.prepend(task("b"));
        assert!(tx.toggle("a"));
        tx.commit().unwrap();

        let stored = repo.list();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, "b");
        assert!(stored[1].completed);
    }

    #[test]
    fn unreadable_slot_refuses_a_transaction() {
        let mut repo =
            SlotTaskRepository::new(MemorySlotStorage::with_slot("student-tasks", "{not json"));
        assert!(matches!(repo.begin(), Err(RepoError::Decode(_))));
        assert!(repo.list().is_empty());
        assert_eq!(repo.storage().raw(repo.key()), Some("{not json"));
    }
}
