//! Sorting, filtering and list-view composition.

use crate::config::{StoreConfig, DEFAULT_UPCOMING_WINDOW_DAYS};
use crate::model::category::Category;
use crate::model::task::Task;
use crate::query::deadline::{days_until_at, is_overdue_at};
use chrono::{DateTime, Utc};

/// Stable ascending sort by deadline; the input is left untouched.
pub fn sort_by_deadline(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.deadline);
    sorted
}

pub fn filter_by_category(tasks: &[Task], category: Category) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.category == category)
        .cloned()
        .collect()
}

/// With `show_completed == false` keeps only open tasks; otherwise passes
/// everything through.
pub fn filter_completed(tasks: &[Task], show_completed: bool) -> Vec<Task> {
    if show_completed {
        return tasks.to_vec();
    }
    tasks.iter().filter(|task| !task.completed).cloned().collect()
}

/// Tabs of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskListView {
    #[default]
    All,
    /// Days-until between 0 and the upcoming window, inclusive. Tasks less
    /// than a day overdue still round to 0 and stay listed.
    Upcoming,
    Overdue,
}

/// Everything a task list needs to turn the stored collection into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListQuery {
    /// `None` shows every category.
    pub category: Option<Category>,
    pub view: TaskListView,
    pub show_completed: bool,
    pub upcoming_window_days: i64,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            category: None,
            view: TaskListView::All,
            show_completed: false,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

impl TaskListQuery {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            upcoming_window_days: config.upcoming_window_days,
            ..Self::default()
        }
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        self.apply_at(tasks, Utc::now())
    }

    /// Category filter, then view filter, then completion filter, then
    /// deadline sort.
    pub fn apply_at(&self, tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
        let mut rows = match self.category {
            Some(category) => filter_by_category(tasks, category),
            None => tasks.to_vec(),
        };

        match self.view {
            TaskListView::All => {}
            TaskListView::Upcoming => rows.retain(|task| {
                let days = days_until_at(task.deadline, now);
                (0..=self.upcoming_window_days).contains(&days)
            }),
            TaskListView::Overdue => rows.retain(|task| is_overdue_at(task.deadline, now)),
        }

        sort_by_deadline(&filter_completed(&rows, self.show_completed))
    }
}
