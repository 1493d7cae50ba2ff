use crate::db::queries::{count_records, outcome_counts, timestamp_bounds};
use crate::errors::AppResult;
use ansi_term::Colour::{Cyan, Fixed, Green, Yellow};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{} {}", Cyan.paint("• File:"), Yellow.paint(db_path));
    println!("{} {:.2} MB", Cyan.paint("• Size:"), file_mb);

    //
    // 2) TOTAL CHECKS
    //
    let count = count_records(conn)?;
    println!(
        "{} {}",
        Cyan.paint("• Total checks:"),
        Green.paint(count.to_string())
    );

    //
    // 3) DATE RANGE
    //
    let bounds = timestamp_bounds(conn)?;
    let dash = Fixed(244).paint("--").to_string();
    let (fmt_first, fmt_last) = bounds
        .clone()
        .unwrap_or_else(|| (dash.clone(), dash.clone()));

    println!("{}", Cyan.paint("• Covered range:"));
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE CHECKS/DAY
    //
    if let Some((f, l)) = bounds
        && let (Some(d1), Some(d2)) = (parse(&f), parse(&l))
    {
        let days = (d2 - d1).num_days().max(1);
        let avg = count as f64 / days as f64;
        println!("{} {:.2}", Cyan.paint("• Average checks/day:"), avg);
    }

    //
    // 5) OUTCOMES
    //
    let per_outcome = outcome_counts(conn)?;
    if !per_outcome.is_empty() {
        println!("{}", Cyan.paint("• By outcome:"));
        for (outcome, n) in per_outcome {
            println!("    {:<24} {}", outcome, n);
        }
    }

    println!();
    Ok(())
}

fn parse(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}
