//! Due-soon reminders.
//!
//! # Responsibility
//! - Turn open tasks due today/tomorrow into user-facing notifications.
//! - Re-run the scan periodically for the lifetime of a session.
//!
//! # Invariants
//! - Scanning never mutates tasks.
//! - Notifications are fire-and-forget: no log, no de-duplication across
//!   scans. A due-soon task is announced again on every scan.

pub mod notify;
pub mod schedule;

pub use notify::{
    due_soon_notifications, due_soon_notifications_at, CollectingSink, DueWhen, LogSink,
    Notification, NotificationSink,
};
pub use schedule::{ReminderLoop, ReminderSchedule};
