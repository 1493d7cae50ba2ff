//! Interactive entry form opened when the user agrees to log a check.

use crate::core::entry::CheckEntry;
use crate::errors::AppResult;
use crate::models::outcome::OutcomeSet;
use crate::ui::input::{read_line, require_terminal};
use crate::ui::messages::{header, info, warning};
use crate::utils::date::{format_timestamp, now};

/// Ask for outcome, notes and time. `None` when the user leaves the form
/// (empty outcome or end of input).
pub fn collect_entry(outcomes: &OutcomeSet) -> AppResult<Option<CheckEntry>> {
    require_terminal("the entry form")?;

    header("Log check entry");
    for (i, label) in outcomes.labels().iter().enumerate() {
        println!("  {}. {}", i + 1, label);
    }
    println!();

    loop {
        let Some(outcome) = read_line("Outcome (number or label, empty to cancel): ")? else {
            return Ok(None);
        };
        if outcome.trim().is_empty() {
            info("Entry cancelled.");
            return Ok(None);
        }

        let notes = read_line("Notes: ")?.unwrap_or_default();
        let at = read_line(&format!(
            "Date/time [{}]: ",
            format_timestamp(&now())
        ))?;

        match CheckEntry::from_inputs(outcomes, &outcome, &notes, at.as_deref()) {
            Ok(entry) => return Ok(Some(entry)),
            Err(e) if e.is_validation() => warning(format!("{e}. Please try again.")),
            Err(e) => return Err(e),
        }
    }
}
