//! Pure query helpers over task collections.
//!
//! # Responsibility
//! - Deadline arithmetic (overdue, days-until, badges, display formatting).
//! - Sorting, filtering and list-view composition.
//!
//! # Invariants
//! - No helper mutates its input or touches storage.
//! - Every "now"-dependent helper has an `_at` variant taking `now`
//!   explicitly; the plain variant reads the system clock once.

pub mod deadline;
pub mod filter;

pub use deadline::{
    days_until, days_until_at, deadline_badge, deadline_badge_at, format_date, format_date_in,
    format_time, format_time_in, is_overdue, is_overdue_at, DeadlineBadge,
};
pub use filter::{
    filter_by_category, filter_completed, sort_by_deadline, TaskListQuery, TaskListView,
};
