//! Periodic reminder to review the logs.
//!
//! [`ReminderScheduler`] owns one background thread that counts down the
//! configured interval and asks a [`Prompt`] collaborator a three-way
//! question. Reactions are published as [`ReminderEvent`]s on a channel so
//! the foreground decides what "log a check" means.

pub mod prompt;
pub mod scheduler;

pub use prompt::{Prompt, PromptResponse, Reminder, TerminalPrompt};
pub use scheduler::{PromptHold, ReminderScheduler};

use crate::errors::{AppError, AppResult};
use crate::utils::duration::format_duration;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_SNOOZE_INTERVAL: Duration = Duration::from_secs(10 * 60);
/// Longest accepted cadence (one year).
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    /// Wait between full prompts.
    pub interval: Duration,
    /// Shortened wait before re-asking after a snooze.
    pub snooze_interval: Duration,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            snooze_interval: DEFAULT_SNOOZE_INTERVAL,
        }
    }
}

impl ReminderSettings {
    pub fn new(interval: Duration, snooze_interval: Duration) -> Self {
        Self {
            interval,
            snooze_interval,
        }
    }

    /// Both durations positive, snooze strictly shorter than the cadence.
    pub fn validate(&self) -> AppResult<()> {
        if self.interval.is_zero() || self.snooze_interval.is_zero() {
            return Err(AppError::Validation(
                "reminder intervals must be positive".into(),
            ));
        }
        if self.interval > MAX_INTERVAL {
            return Err(AppError::Validation(format!(
                "reminder interval ({}) exceeds the maximum of {}",
                format_duration(self.interval),
                format_duration(MAX_INTERVAL)
            )));
        }
        if self.snooze_interval >= self.interval {
            return Err(AppError::Validation(format!(
                "snooze interval ({}) must be shorter than the reminder interval ({})",
                format_duration(self.snooze_interval),
                format_duration(self.interval)
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Stopped,
    Waiting,
    Prompting,
    Snoozed,
}

impl fmt::Display for ReminderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReminderState::Stopped => "stopped",
            ReminderState::Waiting => "waiting",
            ReminderState::Prompting => "prompting",
            ReminderState::Snoozed => "snoozed",
        };
        f.write_str(s)
    }
}

/// Notifications published by the scheduler thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderEvent {
    /// A prompt is being shown.
    Prompted,
    /// The user wants to log a check now; handle it on the foreground.
    LogCheck,
    /// The user asked to be reminded again after the snooze interval.
    Snoozed,
    /// The reminder was dismissed until the next full interval.
    Dismissed,
    /// The prompt could not be shown; the cadence continues.
    PromptFailed(String),
    /// The background loop has exited.
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_two_hours_and_ten_minutes() {
        let s = ReminderSettings::default();
        assert_eq!(s.interval.as_secs(), 7200);
        assert_eq!(s.snooze_interval.as_secs(), 600);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_and_long_snooze() {
        let zero = ReminderSettings::new(Duration::ZERO, Duration::from_secs(1));
        assert!(zero.validate().is_err());

        let equal = ReminderSettings::new(Duration::from_secs(60), Duration::from_secs(60));
        assert!(equal.validate().is_err());

        let ok = ReminderSettings::new(Duration::from_secs(60), Duration::from_secs(59));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn validation_rejects_intervals_beyond_a_year() {
        let huge = ReminderSettings::new(Duration::from_secs(u64::MAX), Duration::from_secs(600));
        assert!(huge.validate().is_err());

        let year = ReminderSettings::new(MAX_INTERVAL, Duration::from_secs(600));
        assert!(year.validate().is_ok());
    }
}
