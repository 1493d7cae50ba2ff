//! A check as typed by the user, validated before it reaches the store.

use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::models::outcome::OutcomeSet;
use crate::utils::date::parse_timestamp;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEntry {
    pub outcome: String,
    pub notes: String,
    /// `None` means "now" at the time of saving.
    pub timestamp: Option<NaiveDateTime>,
}

impl CheckEntry {
    /// Validate raw inputs.
    ///
    /// `outcome` is a label or a 1-based index into `outcomes`; `at` is any
    /// format accepted by [`parse_timestamp`], blank meaning now.
    pub fn from_inputs(
        outcomes: &OutcomeSet,
        outcome: &str,
        notes: &str,
        at: Option<&str>,
    ) -> AppResult<Self> {
        let outcome = outcomes.resolve(outcome)?;
        let timestamp = match at.map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(parse_timestamp(s)?),
        };

        Ok(Self {
            outcome,
            notes: notes.trim().to_string(),
            timestamp,
        })
    }

    pub fn save(&self, store: &RecordStore) -> AppResult<i64> {
        store.add(&self.outcome, &self.notes, self.timestamp)
    }
}
