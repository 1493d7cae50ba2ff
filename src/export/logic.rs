// src/export/logic.rs

use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::range::parse_range;
use crate::export::{ExportFormat, notify_export_success, write_csv, write_json};
use crate::ui::messages::{info, warning};
use std::path::Path;

/// High level export driven by the `export` subcommand.
pub struct ExportLogic;

impl ExportLogic {
    /// Export check records.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period such as `YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD` or `start:end` with the same layout on both sides
    /// - `limit`: cap on the number of (most recent) records
    ///
    /// Returns the number of exported records.
    pub fn export(
        store: &RecordStore,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        limit: Option<usize>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        info(format!(
            "Exporting to {}: {}",
            format.as_str().to_uppercase(),
            path.display()
        ));

        let rows = match (format, bounds) {
            (ExportFormat::Csv, None) => store.export(path, limit)?,
            (format, bounds) => {
                let records = match bounds {
                    Some((from, to)) => store.list_between(&from, &to, limit)?,
                    None => match limit {
                        Some(l) => store.list(l, 0)?,
                        None => store.list_all()?,
                    },
                };
                match format {
                    ExportFormat::Csv => write_csv(&records, path)?,
                    ExportFormat::Json => write_json(&records, path)?,
                }
                records.len()
            }
        };

        if rows == 0 {
            warning("No check records found for the selected range.");
        }

        notify_export_success(&format.as_str().to_uppercase(), rows, path);
        Ok(rows)
    }
}
