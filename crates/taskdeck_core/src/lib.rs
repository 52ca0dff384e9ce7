//! Core task store for the student task tracker.
//! This crate owns the persisted task collection and every query over it;
//! presentation layers call in and re-fetch after each mutation.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryStyle, ParseCategoryError};
pub use model::id::generate_id;
pub use model::task::{is_storable_timestamp, NewTaskRequest, Task, TaskId, TaskValidationError};
pub use query::{
    days_until, days_until_at, deadline_badge, deadline_badge_at, filter_by_category,
    filter_completed, format_date, format_time, is_overdue, is_overdue_at, sort_by_deadline,
    DeadlineBadge, TaskListQuery, TaskListView,
};
pub use reminder::{
    CollectingSink, DueWhen, LogSink, Notification, NotificationSink, ReminderLoop,
    ReminderSchedule,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SlotTaskRepository, TaskRepository, TaskTransaction,
};
pub use service::task_service::{TaskService, TaskServiceError};
pub use storage::{MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
