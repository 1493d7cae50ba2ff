use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    info("Initializing rLogCheck…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_path.display());

    let store = RecordStore::open(&db_path)?;
    tracing::info!(path = %db_path.display(), records = store.count()?, "database initialized");

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
