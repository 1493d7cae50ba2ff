//! The three-way question asked when a reminder fires.

use crate::errors::{AppError, AppResult};
use crate::ui::input::{read_line, require_terminal};
use crate::ui::messages::{reminder, warning};
use crate::utils::duration::format_duration;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// Open the entry form now.
    Proceed,
    /// Ask again after the snooze interval.
    Snooze,
    /// Skip until the next full interval.
    Dismiss,
}

impl PromptResponse {
    /// Map a typed answer to a response (`y`/`n`/`c`, case-insensitive).
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(PromptResponse::Proceed),
            "n" | "no" | "s" | "snooze" => Some(PromptResponse::Snooze),
            "c" | "cancel" | "d" | "dismiss" => Some(PromptResponse::Dismiss),
            _ => None,
        }
    }
}

/// Text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub message: String,
}

impl Reminder {
    pub fn new(snooze_interval: Duration) -> Self {
        Self {
            title: "Log Check Reminder".to_string(),
            message: format!(
                "Time to check the logs!\n\
                 Have you checked the log sources recently?\n\n  \
                 y - Open log entry form\n  \
                 n - Snooze for {}\n  \
                 c - Dismiss reminder",
                format_duration(snooze_interval)
            ),
        }
    }
}

/// Something able to ask the user a blocking three-way question.
///
/// Returning `Err` means the question could not be presented at all; the
/// scheduler logs it and keeps its cadence.
pub trait Prompt: Send + Sync {
    fn ask(&self, reminder: &Reminder) -> AppResult<PromptResponse>;
}

impl<F> Prompt for F
where
    F: Fn(&Reminder) -> AppResult<PromptResponse> + Send + Sync,
{
    fn ask(&self, reminder: &Reminder) -> AppResult<PromptResponse> {
        self(reminder)
    }
}

/// Prompt on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, r: &Reminder) -> AppResult<PromptResponse> {
        require_terminal("the reminder prompt")?;

        reminder(&r.title);
        println!("{}\n", r.message);

        loop {
            let answer = read_line("Your choice [y/n/c]: ")?.ok_or_else(|| {
                AppError::Presentation("input closed while waiting for an answer".into())
            })?;

            if let Some(resp) = PromptResponse::from_answer(&answer) {
                return Ok(resp);
            }
            warning(format!("'{}' is not one of y, n, c.", answer.trim()));
        }
    }
}
