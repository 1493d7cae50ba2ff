use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::input::confirm_destructive;
use crate::ui::messages::{info, success};
use crate::utils::date::{days_ago, format_timestamp, parse_timestamp};

/// Delete every record whose timestamp is strictly before the cutoff.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Prune {
        before,
        older_than,
        yes,
    } = cmd
    {
        let cutoff = match (before, older_than) {
            (Some(b), _) => parse_timestamp(b)?,
            (None, Some(d)) => days_ago(*d),
            (None, None) => {
                return Err(AppError::Validation(
                    "either --before or --older-than is required".into(),
                ));
            }
        };

        let prompt = format!(
            "Delete all checks recorded before {}? This action is irreversible.",
            format_timestamp(&cutoff)
        );
        if !confirm_destructive(&prompt, *yes)? {
            info("Operation cancelled.");
            return Ok(());
        }

        let store = open_store(cfg)?;
        let removed = store.prune_before(&cutoff)?;
        success(format!("{removed} check record(s) pruned."));
    }
    Ok(())
}
