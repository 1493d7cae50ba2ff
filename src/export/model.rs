// src/export/model.rs

use crate::models::check_record::CheckRecord;
use serde::Serialize;

/// Flat row used for the tabular export. Field names are the CSV header.
#[derive(Serialize, Clone, Debug)]
pub struct CheckExport {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Outcome")]
    pub outcome: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Created At")]
    pub created_at: String,
}

impl From<&CheckRecord> for CheckExport {
    fn from(r: &CheckRecord) -> Self {
        Self {
            id: r.id,
            timestamp: r.timestamp_str(),
            outcome: r.outcome.clone(),
            notes: r.notes.clone(),
            created_at: r.created_at_str(),
        }
    }
}

/// Fixed column order of the tabular export.
pub const HEADERS: [&str; 5] = ["ID", "Timestamp", "Outcome", "Notes", "Created At"];
