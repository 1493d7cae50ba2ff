use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::CheckEntry;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Record a check from command-line arguments.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { outcome, notes, at } = cmd {
        // Validate before touching the database.
        let entry = CheckEntry::from_inputs(&cfg.outcomes, outcome, notes, at.as_deref())?;

        let store = open_store(cfg)?;
        let id = entry.save(&store)?;

        success(format!("Check #{id} recorded: {}", entry.outcome));
    }
    Ok(())
}
