use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::check_record::CheckRecord;
use ansi_term::Colour::{Cyan, Green};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let store = open_store(cfg)?;
        match store.get(*id)? {
            Some(r) => print_record(&r),
            None => {
                return Err(AppError::Validation(format!("no check record with id {id}")));
            }
        }
    }
    Ok(())
}

fn print_record(r: &CheckRecord) {
    let label = |s: &str| Cyan.paint(format!("{s:<11}"));

    println!("{} {}", label("ID:"), Green.bold().paint(r.id.to_string()));
    println!("{} {}", label("Timestamp:"), r.timestamp_str());
    println!("{} {}", label("Outcome:"), r.outcome);
    println!("{} {}", label("Created at:"), r.created_at_str());
    let days = r.age().num_days();
    if days >= 0 {
        println!("{} {} day(s)", label("Age:"), days);
    } else {
        println!("{} scheduled in the future", label("Age:"));
    }
    if r.notes.is_empty() {
        println!("{} -", label("Notes:"));
    } else {
        println!("{}", label("Notes:"));
        for line in r.notes.lines() {
            println!("  {line}");
        }
    }
}
