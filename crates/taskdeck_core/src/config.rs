//! Store configuration.
//!
//! # Responsibility
//! - Hold the tunables shared by the repository, list views and reminders.
//! - Parse host-supplied JSON with per-field defaults.
//!
//! # Invariants
//! - `storage_key` is never empty.
//! - `reminder_interval_secs` is never zero.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Slot name used when the host does not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "student-tasks";
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60 * 60;
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_BADGE_WINDOW_DAYS: i64 = 3;
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the single slot holding the task array.
    pub storage_key: String,
    /// Period between due-soon scans.
    pub reminder_interval_secs: u64,
    /// Upper bound (inclusive) of the "next N days" list view.
    pub upcoming_window_days: i64,
    /// Tasks due within this many days get a deadline badge.
    pub badge_window_days: i64,
    /// How long hosts should keep a reminder toast on screen.
    pub notification_duration_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            reminder_interval_secs: DEFAULT_REMINDER_INTERVAL_SECS,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            badge_window_days: DEFAULT_BADGE_WINDOW_DAYS,
            notification_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
        }
    }
}

impl StoreConfig {
    /// Parses a JSON object; absent fields keep their defaults.
    ///
    /// # Errors
    /// - Returns `ConfigError::Parse` for malformed JSON or wrong field types.
    /// - Returns `ConfigError::Invalid` when a parsed value breaks an invariant.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key cannot be empty"));
        }
        if self.reminder_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "reminder_interval_secs must be greater than zero",
            ));
        }
        if self.upcoming_window_days < 0 || self.badge_window_days < 0 {
            return Err(ConfigError::Invalid("day windows cannot be negative"));
        }
        Ok(())
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid store config: {err}"),
            Self::Invalid(details) => write!(f, "invalid store config: {details}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};
    use std::time::Duration;

    #[test]
    fn empty_object_yields_defaults() {
        let config = StoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.reminder_interval(), Duration::from_secs(3_600));
    }

    #[test]
    fn partial_object_overrides_only_given_fields() {
        let config =
            StoreConfig::from_json_str(r#"{"storage_key":"tasks-v2","upcoming_window_days":14}"#)
                .unwrap();
        assert_eq!(config.storage_key, "tasks-v2");
        assert_eq!(config.upcoming_window_days, 14);
        assert_eq!(config.badge_window_days, 3);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = StoreConfig::from_json_str(r#"{"reminder_interval_secs":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StoreConfig::from_json_str("{storage_key").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
