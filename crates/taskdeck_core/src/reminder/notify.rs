//! Due-soon scan and notification sinks.

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use crate::model::task::{Task, TaskId};
use crate::query::deadline::{days_until_at, format_date};
use chrono::{DateTime, Utc};
use log::info;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Which due-soon bucket a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWhen {
    Today,
    Tomorrow,
}

impl DueWhen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }

    fn from_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(Self::Today),
            1 => Some(Self::Tomorrow),
            _ => None,
        }
    }
}

/// One ephemeral toast for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub task_id: TaskId,
    pub due: DueWhen,
    /// e.g. `Task due tomorrow!`
    pub title: String,
    /// e.g. `"Essay draft" is due Oct 18, 2026`
    pub description: String,
    /// How long the host should keep it visible.
    pub duration: Duration,
}

impl Notification {
    fn due_soon(task: &Task, due: DueWhen, duration: Duration) -> Self {
        Self {
            task_id: task.id.clone(),
            due,
            title: format!("Task due {}!", due.as_str()),
            description: format!("\"{}\" is due {}", task.title, format_date(task.deadline)),
            duration,
        }
    }
}

pub fn due_soon_notifications(tasks: &[Task]) -> Vec<Notification> {
    due_soon_notifications_at(
        tasks,
        Utc::now(),
        Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
    )
}

/// One notification per open task whose days-until is 0 or 1, in stored
/// order.
pub fn due_soon_notifications_at(
    tasks: &[Task],
    now: DateTime<Utc>,
    duration: Duration,
) -> Vec<Notification> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .filter_map(|task| {
            DueWhen::from_days(days_until_at(task.deadline, now))
                .map(|due| Notification::due_soon(task, due, duration))
        })
        .collect()
}

/// Receiver of reminder notifications, typically a toast queue.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// Buffers notifications in memory; shareable across threads.
#[derive(Debug, Default)]
pub struct CollectingSink {
    received: Mutex<Vec<Notification>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        let mut received = self.received.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *received)
    }

    pub fn len(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

/// Writes reminders to the core log. Titles stay out of the log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: &Notification) {
        info!(
            "event=reminder_due module=reminder status=ok task_id={} due={}",
            notification.task_id,
            notification.due.as_str()
        );
    }
}
