//! Task use-case service.
//!
//! # Responsibility
//! - Validate creation input and assign ids and creation timestamps.
//! - Delegate persistence to any `TaskRepository`.
//! - Run the due-soon reminder scan against the stored collection.
//!
//! # Invariants
//! - Tasks created here carry a store-generated id, never a caller one.
//! - Service APIs never bypass repository persistence contracts.

use crate::config::StoreConfig;
use crate::model::id::generate_id;
use crate::model::task::{truncate_to_millis, NewTaskRequest, Task, TaskValidationError};
use crate::query::deadline::{deadline_badge_at, DeadlineBadge};
use crate::query::filter::TaskListQuery;
use crate::reminder::notify::{due_soon_notifications_at, NotificationSink};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    config: StoreConfig,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, StoreConfig::default())
    }

    pub fn with_config(repo: R, config: StoreConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_task(&mut self, request: NewTaskRequest) -> Result<Task, TaskServiceError> {
        self.create_task_at(request, Utc::now())
    }

    /// Validates `request` against `now`, then persists a new task.
    ///
    /// # Contract
    /// - `id` comes from `generate_id`.
    /// - `created_at` is `now` truncated to milliseconds, so the stored
    ///   value round-trips exactly.
    /// - Returns the task as persisted.
    pub fn create_task_at(
        &mut self,
        request: NewTaskRequest,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskServiceError> {
        request.validate_at(now)?;
        let task = Task::from_request(request, generate_id(), truncate_to_millis(now));
        self.repo.create(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={} category={}",
            task.id, task.category
        );
        Ok(task)
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        self.repo.list()
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        self.repo.get(id)
    }

    /// Lists and shapes tasks for one list view.
    pub fn query_tasks(&self, query: &TaskListQuery) -> Vec<Task> {
        query.apply(&self.repo.list())
    }

    pub fn query_tasks_at(&self, query: &TaskListQuery, now: DateTime<Utc>) -> Vec<Task> {
        query.apply_at(&self.repo.list(), now)
    }

    /// Badge for `task` using the configured badge window.
    pub fn deadline_badge_at(&self, task: &Task, now: DateTime<Utc>) -> Option<DeadlineBadge> {
        deadline_badge_at(task, now, self.config.badge_window_days)
    }

    /// Whole-record replace by id; unknown ids are ignored.
    pub fn update_task(&mut self, task: &Task) -> RepoResult<()> {
        self.repo.update(task)
    }

    pub fn delete_task(&mut self, id: &str) -> RepoResult<()> {
        self.repo.delete(id)?;
        debug!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    pub fn toggle_task_completion(&mut self, id: &str) -> RepoResult<()> {
        self.repo.toggle_completion(id)
    }

    pub fn notify_due_soon<N: NotificationSink + ?Sized>(&self, sink: &N) -> usize {
        self.notify_due_soon_at(sink, Utc::now())
    }

    /// Emits one notification per open task due today or tomorrow.
    ///
    /// Returns the number of notifications emitted.
    pub fn notify_due_soon_at<N: NotificationSink + ?Sized>(
        &self,
        sink: &N,
        now: DateTime<Utc>,
    ) -> usize {
        let notifications = due_soon_notifications_at(
            &self.repo.list(),
            now,
            self.config.notification_duration(),
        );
        for notification in &notifications {
            sink.notify(notification);
        }
        debug!(
            "event=reminder_scan module=service status=ok emitted={}",
            notifications.len()
        );
        notifications.len()
    }
}
