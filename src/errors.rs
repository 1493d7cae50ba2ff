//! Unified application error type.
//! All modules (db, core, reminder, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation (UI boundary)
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid date/time format: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Unknown outcome: {0}")]
    InvalidOutcome(String),

    // ---------------------------
    // Reminder prompt
    // ---------------------------
    #[error("Cannot present reminder: {0}")]
    Presentation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures of the persisted table or of a file on disk.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Db(_) | AppError::Migration(_) | AppError::Export(_)
        )
    }

    /// True for malformed user input rejected before reaching the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidDate(_)
                | AppError::InvalidDuration(_)
                | AppError::InvalidOutcome(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_and_validation_classes_are_disjoint() {
        let io = AppError::from(io::Error::other("disk full"));
        assert!(io.is_storage());
        assert!(!io.is_validation());

        let bad = AppError::InvalidOutcome("Maybe".into());
        assert!(bad.is_validation());
        assert!(!bad.is_storage());

        assert!(!AppError::Presentation("no tty".into()).is_storage());
    }
}
