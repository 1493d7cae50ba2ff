use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::reminder::{ReminderEvent, ReminderScheduler, ReminderSettings, TerminalPrompt};
use crate::ui::form::collect_entry;
use crate::ui::input::require_terminal;
use crate::ui::messages::{error, info, success, warning};
use crate::utils::duration::{format_duration, parse_duration};

/// Run the reminder loop until the process is interrupted.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval, snooze } = cmd {
        let settings = watch_settings(cfg, interval.as_deref(), snooze.as_deref())?;
        require_terminal("watch")?;

        let store = open_store(cfg)?;
        let mut scheduler = ReminderScheduler::new(settings, TerminalPrompt)?;
        let events = scheduler.events();
        scheduler.start()?;

        info(format!(
            "Reminding every {} (snooze {}). Press Ctrl+C to quit.",
            format_duration(settings.interval),
            format_duration(settings.snooze_interval)
        ));

        for ev in events.iter() {
            match ev {
                ReminderEvent::Prompted => {}
                ReminderEvent::LogCheck => {
                    let _hold = scheduler.hold_prompts();
                    log_check(&store, cfg);
                }
                ReminderEvent::Snoozed => info(format!(
                    "Snoozed, next reminder in {}.",
                    format_duration(scheduler.settings().snooze_interval)
                )),
                ReminderEvent::Dismissed => info(format!(
                    "Dismissed, next reminder in {}.",
                    format_duration(scheduler.settings().interval)
                )),
                ReminderEvent::PromptFailed(msg) => warning(msg),
                ReminderEvent::Stopped => break,
            }
        }

        scheduler.stop();
    }
    Ok(())
}

/// Config cadence with optional command-line overrides.
fn watch_settings(
    cfg: &Config,
    interval: Option<&str>,
    snooze: Option<&str>,
) -> AppResult<ReminderSettings> {
    let settings = ReminderSettings::new(
        parse_duration(interval.unwrap_or(&cfg.reminder_interval))?,
        parse_duration(snooze.unwrap_or(&cfg.snooze_interval))?,
    );
    settings.validate()?;
    Ok(settings)
}

/// Open the entry form and save the result. Failures are reported and the
/// reminder loop carries on.
pub(crate) fn log_check(store: &RecordStore, cfg: &Config) {
    let saved = collect_entry(&cfg.outcomes).and_then(|entry| match entry {
        Some(e) => e.save(store).map(|id| Some((id, e.outcome))),
        None => Ok(None),
    });

    match saved {
        Ok(Some((id, outcome))) => success(format!("Check #{id} recorded: {outcome}")),
        Ok(None) => {}
        Err(e) => error(format!("Check not saved: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn overrides_replace_config_values() {
        let cfg = Config::default();
        let s = watch_settings(&cfg, Some("30m"), None).unwrap();
        assert_eq!(s.interval, Duration::from_secs(1800));
        assert_eq!(s.snooze_interval, Duration::from_secs(600));

        let s = watch_settings(&cfg, None, None).unwrap();
        assert_eq!(s, cfg.reminder_settings().unwrap());
    }

    #[test]
    fn override_must_keep_snooze_shorter() {
        let cfg = Config::default();
        assert!(watch_settings(&cfg, Some("5m"), None).is_err());
        assert!(watch_settings(&cfg, Some("5m"), Some("1m")).is_ok());
    }
}
