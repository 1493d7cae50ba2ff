// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod range;

pub use logic::ExportLogic;
pub use model::{CheckExport, HEADERS};

use crate::errors::AppResult;
use crate::models::check_record::CheckRecord;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, rows: usize, path: &Path) {
    success(format!(
        "{label} export completed: {rows} record(s) → {}",
        path.display()
    ));
}

/// Write records as CSV (`ID,Timestamp,Outcome,Notes,Created At`).
pub fn write_csv(records: &[CheckRecord], path: &Path) -> AppResult<()> {
    json_csv::export_csv(records, path)
}

pub fn write_json(records: &[CheckRecord], path: &Path) -> AppResult<()> {
    json_csv::export_json(records, path)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
