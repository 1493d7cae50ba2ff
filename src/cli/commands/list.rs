use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::check_record::CheckRecord;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};
use ansi_term::Colour::{Green, Red, Yellow};

const NOTES_PREVIEW: usize = 48;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        limit,
        offset,
        days,
        recent,
    } = cmd
    {
        let store = open_store(cfg)?;

        let window = days.or(recent.then_some(cfg.recent_days));
        let records = match window {
            Some(d) => {
                let mut rows = store.list_recent(d)?;
                if let Some(l) = limit {
                    rows.truncate(*l);
                }
                header(format!("Checks in the last {d} day(s)"));
                rows
            }
            None => {
                header("Check history");
                store.list(limit.unwrap_or(cfg.history_limit), *offset)?
            }
        };

        if records.is_empty() {
            info("No check records found.");
            return Ok(());
        }

        print!("{}", render_records(&records));
        println!("\n{} record(s)", records.len());
    }
    Ok(())
}

fn paint_outcome(outcome: &str) -> String {
    let lower = outcome.to_lowercase();
    if lower.contains("good") || lower.contains("no issues") {
        Green.paint(outcome).to_string()
    } else if lower.contains("issue") || lower.contains("action") {
        Red.paint(outcome).to_string()
    } else {
        Yellow.paint(outcome).to_string()
    }
}

pub(crate) fn render_records(records: &[CheckRecord]) -> String {
    let mut notes = Column::new("Notes");
    notes.max_width = Some(NOTES_PREVIEW);

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Timestamp"),
        Column::new("Outcome"),
        notes,
    ]);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.timestamp_str(),
            paint_outcome(&r.outcome),
            r.notes_preview(NOTES_PREVIEW),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::table::strip_ansi;
    use chrono::NaiveDate;

    #[test]
    fn table_has_one_line_per_record() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let rec = |id, outcome: &str| CheckRecord {
            id,
            timestamp: ts,
            outcome: outcome.to_string(),
            notes: "multi\nline".to_string(),
            created_at: ts,
        };

        let out = strip_ansi(&render_records(&[rec(1, "All Good"), rec(2, "Issues Found")]));
        assert!(out.contains("2024-05-01 08:00:00"));
        assert!(out.contains("Issues Found"));
        // header + separator + two rows
        assert_eq!(out.lines().count(), 4);
    }
}
