//! Task record and creation-boundary validation.
//!
//! # Responsibility
//! - Define the canonical `Task` shape stored in the task slot.
//! - Validate `NewTaskRequest` input the way the creation form does.
//!
//! # Invariants
//! - Timestamps serialize as RFC 3339 UTC strings and round-trip losslessly.
//!   Years outside `0..=9999` have no four-digit RFC 3339 form and are
//!   refused at encode time.
//! - The store never calls `validate_at`; validation is a caller concern.

use crate::model::category::Category;
use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, SecondsFormat, SubsecRound,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque task identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
/// Years a stored timestamp may fall in.
pub const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// One trackable item of student work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned once at creation.
    pub id: TaskId,
    pub title: String,
    /// Empty when the user left it blank.
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    /// Set once at creation.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a fresh, incomplete task from validated creation input.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - A missing description becomes an empty string.
    pub fn from_request(request: NewTaskRequest, id: TaskId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description.unwrap_or_default(),
            category: request.category,
            deadline: request.deadline,
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag.
    pub fn toggle_completion(&mut self) {
        self.completed = !self.completed;
    }
}

/// Creation input as collected by a task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub deadline: DateTime<Utc>,
}

impl NewTaskRequest {
    /// Checks title/description lengths and that the deadline is not on a
    /// past local day relative to `now`.
    ///
    /// Lengths count Unicode scalar values, not bytes.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), TaskValidationError> {
        let title_chars = self.title.chars().count();
        if title_chars < TITLE_MIN_CHARS {
            return Err(TaskValidationError::TitleTooShort {
                min: TITLE_MIN_CHARS,
                actual: title_chars,
            });
        }
        if title_chars > TITLE_MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual: title_chars,
            });
        }

        if let Some(description) = self.description.as_deref() {
            let description_chars = description.chars().count();
            if description_chars > DESCRIPTION_MAX_CHARS {
                return Err(TaskValidationError::DescriptionTooLong {
                    max: DESCRIPTION_MAX_CHARS,
                    actual: description_chars,
                });
            }
        }

        if !is_storable_timestamp(&self.deadline) {
            return Err(TaskValidationError::DeadlineOutOfRange {
                deadline: self.deadline,
            });
        }
        if self.deadline < local_day_start(now) {
            return Err(TaskValidationError::DeadlineInPast {
                deadline: self.deadline,
            });
        }

        Ok(())
    }

    /// Form default for the deadline picker: the last millisecond of the
    /// local day containing `now`.
    pub fn default_deadline_at(now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&Local).date_naive();
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .and_then(|end| local_instant(today, end))
            .unwrap_or(now)
    }
}

/// Creation-boundary validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    TitleTooShort { min: usize, actual: usize },
    TitleTooLong { max: usize, actual: usize },
    DescriptionTooLong { max: usize, actual: usize },
    DeadlineInPast { deadline: DateTime<Utc> },
    DeadlineOutOfRange { deadline: DateTime<Utc> },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { min, actual } => write!(
                f,
                "title must be at least {min} characters (got {actual})"
            ),
            Self::TitleTooLong { max, actual } => {
                write!(f, "title cannot exceed {max} characters (got {actual})")
            }
            Self::DescriptionTooLong { max, actual } => write!(
                f,
                "description cannot exceed {max} characters (got {actual})"
            ),
            Self::DeadlineInPast { deadline } => write!(
                f,
                "deadline {} falls on a day that has already passed",
                format_timestamp(deadline)
            ),
            Self::DeadlineOutOfRange { deadline } => write!(
                f,
                "deadline {} is outside the storable years {}..={}",
                format_timestamp(deadline),
                STORABLE_YEARS.start(),
                STORABLE_YEARS.end()
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Renders a timestamp in its stored form.
///
/// Millisecond-aligned values use exactly three fractional digits
/// (`2026-10-17T09:30:00.000Z`); finer values keep their full precision.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    let format = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    value.to_rfc3339_opts(format, true)
}

/// Whether `value` has a four-digit-year RFC 3339 form that
/// [`parse_timestamp`] reads back.
pub fn is_storable_timestamp(value: &DateTime<Utc>) -> bool {
    STORABLE_YEARS.contains(&value.year())
}

/// Parses any RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|parsed| parsed.with_timezone(&Utc))
}

pub(crate) fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

fn local_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start_in(&Local, now)
}

/// First instant of the `tz` day containing `now`.
///
/// When midnight falls in a DST gap the day starts at the first local
/// minute that exists.
fn day_start_in<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(midnight) = NaiveTime::from_hms_opt(0, 0, 0)
        .map(|midnight| now.with_timezone(tz).date_naive().and_time(midnight))
    else {
        return now;
    };
    (0..24 * 60)
        .map(|minute| midnight + Duration::minutes(minute))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or(now)
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

mod timestamp {
    use super::{format_timestamp, is_storable_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if !is_storable_timestamp(value) {
            return Err(serde::ser::Error::custom(format!(
                "timestamp {} is outside the storable years",
                format_timestamp(value)
            )));
        }
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
