//! Line-oriented input helpers for confirmations and the entry form.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, BufRead, IsTerminal, Write};

/// Print `prompt` and read one line from stdin.
/// Returns `None` on end of input.
pub fn read_line(prompt: &str) -> AppResult<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut s = String::new();
    let n = io::stdin().lock().read_line(&mut s)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask a yes/no confirmation from the user. Anything but y/yes is "no".
pub fn confirm(prompt: &str) -> AppResult<bool> {
    let answer = read_line(&format!("{prompt} [y/N]: "))?;
    Ok(matches!(
        answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
        Some("y") | Some("yes")
    ))
}

/// Destructive operations ask first unless `--yes` was given.
pub fn confirm_destructive(prompt: &str, assume_yes: bool) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    warning(prompt);
    confirm("Confirm")
}

/// Fail early when an interactive answer is needed but stdin is not a terminal.
pub fn require_terminal(what: &str) -> AppResult<()> {
    if io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(AppError::Presentation(format!(
            "{what} needs an interactive terminal"
        )))
    }
}
