use crate::cli::commands::open_store;
use crate::cli::commands::watch::log_check;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::reminder::{ReminderEvent, ReminderScheduler, TerminalPrompt};
use crate::ui::input::require_terminal;
use crate::ui::messages::info;
use crate::utils::duration::format_duration;

/// Prompt immediately; a snooze keeps the process alive until the user
/// either logs the check or dismisses the reminder.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let settings = cfg.reminder_settings()?;
    require_terminal("remind")?;

    let store = open_store(cfg)?;
    let mut scheduler = ReminderScheduler::new(settings, TerminalPrompt)?;
    let events = scheduler.events();
    scheduler.start()?;

    if !scheduler.force_prompt() {
        return Err(AppError::Other("reminder loop did not start".into()));
    }

    let last = loop {
        match events.recv() {
            Ok(ReminderEvent::Prompted) => {}
            Ok(ReminderEvent::Snoozed) => info(format!(
                "Snoozed, asking again in {}.",
                format_duration(settings.snooze_interval)
            )),
            Ok(ev) => break ev,
            Err(_) => break ReminderEvent::Stopped,
        }
    };
    scheduler.stop();

    match last {
        ReminderEvent::LogCheck => log_check(&store, cfg),
        ReminderEvent::PromptFailed(msg) => return Err(AppError::Other(msg)),
        _ => info("Reminder dismissed."),
    }
    Ok(())
}
