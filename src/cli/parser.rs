use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rLogCheck
/// CLI application to record periodic log checks with SQLite
#[derive(Parser)]
#[command(
    name = "rlogcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "A log-check reminder helper: record periodic log reviews in SQLite and get nudged when one is due",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default value")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Record a log check
    Add {
        /// Outcome label, or its number as shown by `outcomes`
        outcome: String,

        #[arg(long, short = 'n', default_value = "", help = "Free-text notes")]
        notes: String,

        /// When the check happened (YYYY-MM-DD[ HH:MM[:SS]] or `now`)
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Show a single check record
    Show {
        id: i64,
    },

    /// Replace outcome, notes and time of a check record
    Edit {
        id: i64,

        /// Outcome label, or its number as shown by `outcomes`
        outcome: String,

        #[arg(long, short = 'n', default_value = "", help = "Free-text notes")]
        notes: String,

        /// New time of the check; defaults to now
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Delete a check record by ID
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List check records, most recent first
    List {
        #[arg(long, short = 'l', help = "Maximum number of records (default: history_limit)")]
        limit: Option<usize>,

        #[arg(long, default_value_t = 0, help = "Skip the first N records")]
        offset: usize,

        #[arg(
            long,
            short = 'd',
            value_name = "DAYS",
            conflicts_with = "offset",
            help = "Only records from the last DAYS days"
        )]
        days: Option<u32>,

        #[arg(
            long,
            conflicts_with = "days",
            help = "Only records from the last recent_days days (see config)"
        )]
        recent: bool,
    },

    /// Print the number of stored check records
    Count,

    /// Delete check records older than a cutoff
    Prune {
        #[arg(
            long,
            value_name = "DATETIME",
            required_unless_present = "older_than",
            conflicts_with = "older_than",
            help = "Delete records strictly before this date/time"
        )]
        before: Option<String>,

        #[arg(long = "older-than", value_name = "DAYS", help = "Delete records older than DAYS days")]
        older_than: Option<u32>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Store the copy as a .zip archive")]
        compress: bool,
    },

    /// Export check records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Absolute path of the output file
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Export only the N most recent records
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Filter by period:
        ///   YYYY, YYYY-MM, YYYY-MM-DD, or START:END with the same layout
        ///   on both sides; `all` disables filtering
        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List the configured outcome labels
    Outcomes,

    /// Run the reminder loop in the foreground
    Watch {
        #[arg(long, value_name = "DURATION", help = "Reminder interval, e.g. 2h or 90m")]
        interval: Option<String>,

        #[arg(long, value_name = "DURATION", help = "Snooze interval, e.g. 10m")]
        snooze: Option<String>,
    },

    /// Show the reminder prompt once, right now
    Remind,
}
