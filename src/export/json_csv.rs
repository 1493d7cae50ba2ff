// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{CheckExport, HEADERS};
use crate::models::check_record::CheckRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(records: &[CheckRecord], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Export CSV. The header is written even when there are no rows.
pub(crate) fn export_csv(records: &[CheckRecord], path: &Path) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    wtr.write_record(HEADERS)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for r in records {
        wtr.serialize(CheckExport::from(r))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}
