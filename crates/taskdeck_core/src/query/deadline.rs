//! Deadline arithmetic and display helpers.

use crate::config::DEFAULT_BADGE_WINDOW_DAYS;
use crate::model::task::Task;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// True iff `deadline` is strictly before the current time.
pub fn is_overdue(deadline: DateTime<Utc>) -> bool {
    is_overdue_at(deadline, Utc::now())
}

pub fn is_overdue_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deadline < now
}

/// Whole days until `deadline`, rounded up; negative once overdue by a
/// full day or more.
pub fn days_until(deadline: DateTime<Utc>) -> i64 {
    days_until_at(deadline, Utc::now())
}

pub fn days_until_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (deadline - now).num_milliseconds();
    // Integer division truncates toward zero, which is already the ceiling
    // for negative quotients.
    let days = diff_ms / MILLIS_PER_DAY;
    if diff_ms % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Urgency chip shown next to an open task that is due soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineBadge {
    Today,
    Tomorrow,
    InDays(i64),
}

impl DeadlineBadge {
    pub fn label(self) -> String {
        match self {
            Self::Today => "Today".to_string(),
            Self::Tomorrow => "Tomorrow".to_string(),
            Self::InDays(days) => format!("{days} days"),
        }
    }

    /// Today/tomorrow render with the urgent palette.
    pub fn is_urgent(self) -> bool {
        matches!(self, Self::Today | Self::Tomorrow)
    }
}

pub fn deadline_badge(task: &Task) -> Option<DeadlineBadge> {
    deadline_badge_at(task, Utc::now(), DEFAULT_BADGE_WINDOW_DAYS)
}

/// Badge for `task`, or `None` when it is completed, overdue, or due later
/// than `window_days` from `now`.
pub fn deadline_badge_at(
    task: &Task,
    now: DateTime<Utc>,
    window_days: i64,
) -> Option<DeadlineBadge> {
    if task.completed || is_overdue_at(task.deadline, now) {
        return None;
    }
    match days_until_at(task.deadline, now) {
        0 => Some(DeadlineBadge::Today),
        1 => Some(DeadlineBadge::Tomorrow),
        days if days <= window_days => Some(DeadlineBadge::InDays(days)),
        _ => None,
    }
}

/// `Oct 17, 2026` in the local timezone.
pub fn format_date(value: DateTime<Utc>) -> String {
    format_date_in(value, &Local)
}

pub fn format_date_in<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.with_timezone(tz).format("%b %-d, %Y").to_string()
}

/// `9:05 PM` in the local timezone.
pub fn format_time(value: DateTime<Utc>) -> String {
    format_time_in(value, &Local)
}

pub fn format_time_in<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.with_timezone(tz).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::{days_until_at, format_date_in, format_time_in};
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    #[test]
    fn exact_day_multiples_do_not_round_up() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert_eq!(days_until_at(now + Duration::days(2), now), 2);
        assert_eq!(days_until_at(now, now), 0);
        assert_eq!(days_until_at(now - Duration::days(2), now), -2);
    }

    #[test]
    fn one_millisecond_ahead_counts_as_a_day() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert_eq!(days_until_at(now + Duration::milliseconds(1), now), 1);
    }

    #[test]
    fn formatting_follows_the_given_timezone() {
        let value = Utc.with_ymd_and_hms(2026, 10, 17, 21, 5, 0).unwrap();
        assert_eq!(format_date_in(value, &Utc), "Oct 17, 2026");
        assert_eq!(format_time_in(value, &Utc), "9:05 PM");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(value, &tokyo), "Oct 18, 2026");
        assert_eq!(format_time_in(value, &tokyo), "6:05 AM");
    }
}
