use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::CheckEntry;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Replace timestamp, outcome and notes of an existing record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        outcome,
        notes,
        at,
    } = cmd
    {
        let entry = CheckEntry::from_inputs(&cfg.outcomes, outcome, notes, at.as_deref())?;
        let store = open_store(cfg)?;

        if store.update(*id, &entry.outcome, &entry.notes, entry.timestamp)? {
            success(format!("Check #{id} updated."));
        } else {
            warning(format!("No check record with id {id}; nothing changed."));
        }
    }
    Ok(())
}
