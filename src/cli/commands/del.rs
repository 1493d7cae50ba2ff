use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::input::confirm_destructive;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let store = open_store(cfg)?;

        let Some(record) = store.get(*id)? else {
            warning(format!("No check record with id {id}."));
            return Ok(());
        };

        let prompt = format!(
            "Delete check #{id} ({} · {})? This action is irreversible.",
            record.timestamp_str(),
            record.outcome
        );
        if !confirm_destructive(&prompt, *yes)? {
            info("Operation cancelled.");
            return Ok(());
        }

        if store.delete(*id)? {
            success(format!("Check #{id} has been deleted."));
        } else {
            warning(format!("No check record with id {id}."));
        }
    }
    Ok(())
}
