use crate::utils::date::{format_timestamp, now};
use chrono::NaiveDateTime;
use serde::Serialize;

/// One manual log-review event as persisted in `check_records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub id: i64,                   // ⇔ check_records.id (INTEGER PK AUTOINCREMENT)
    pub timestamp: NaiveDateTime,  // ⇔ check_records.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
    pub outcome: String,           // ⇔ check_records.outcome (TEXT NOT NULL)
    pub notes: String,             // ⇔ check_records.notes (TEXT, default '')
    pub created_at: NaiveDateTime, // ⇔ check_records.created_at (TEXT, set on insert)
}

impl CheckRecord {
    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    pub fn created_at_str(&self) -> String {
        format_timestamp(&self.created_at)
    }

    /// Age of the covered check relative to the current wall clock.
    /// Negative when the record was logged for a future time.
    pub fn age(&self) -> chrono::Duration {
        now() - self.timestamp
    }

    /// Single-line preview of the notes for tabular output.
    pub fn notes_preview(&self, max_chars: usize) -> String {
        let flat = self.notes.replace(['\r', '\n'], " ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let mut s: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        s.push_str("...");
        s
    }
}
