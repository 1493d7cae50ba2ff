//! Configurable set of outcome labels offered to the user.
//!
//! The store accepts any label; the set is only consulted when input is
//! collected (CLI arguments, interactive form).

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTCOMES: [&str; 5] = [
    "All Good",
    "Issues Found",
    "Needs Investigation",
    "Action Required",
    "No Access",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeSet(Vec<String>);

impl Default for OutcomeSet {
    fn default() -> Self {
        Self(DEFAULT_OUTCOMES.iter().map(|s| s.to_string()).collect())
    }
}

impl OutcomeSet {
    /// Build a set from labels; blank and duplicated labels are dropped.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for l in labels {
            let l = l.into().trim().to_string();
            if !l.is_empty() && !out.iter().any(|o| o.eq_ignore_ascii_case(&l)) {
                out.push(l);
            }
        }
        Self(out)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve user input to a canonical label.
    ///
    /// Accepts a 1-based index (`"2"`) or a label matched case-insensitively.
    /// An empty set accepts any non-empty label as-is.
    pub fn resolve(&self, input: &str) -> AppResult<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::Validation("outcome is required".into()));
        }

        if self.0.is_empty() {
            return Ok(input.to_string());
        }

        if let Ok(idx) = input.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| self.0.get(i))
                .cloned()
                .ok_or_else(|| {
                    AppError::InvalidOutcome(format!(
                        "#{idx} (choose 1..={})",
                        self.0.len()
                    ))
                });
        }

        self.0
            .iter()
            .find(|o| o.eq_ignore_ascii_case(input))
            .cloned()
            .ok_or_else(|| {
                AppError::InvalidOutcome(format!(
                    "'{input}' (expected one of: {})",
                    self.0.join(", ")
                ))
            })
    }
}
