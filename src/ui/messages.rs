//! Terminal messages with a consistent icon/colour per severity.

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_BELL: &str = "🔔";

fn line<T: fmt::Display>(style: Style, icon: &str, msg: T) -> String {
    format!("{} {}", style.paint(icon), msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Blue.bold(), ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Green.bold(), ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Yellow.bold(), ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Red.bold(), ICON_ERR, msg));
}

/// Banner shown when a reminder fires.
pub fn reminder<T: fmt::Display>(title: T) {
    println!();
    println!("{}", line(Yellow.bold(), ICON_BELL, Yellow.bold().paint(title.to_string())));
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Blue.bold().paint(format!("====================== {msg}\n")));
}
