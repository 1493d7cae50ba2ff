use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::migrate::{SCHEMA_VERSION, run_pending_migrations, user_version};
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use ansi_term::Colour::Cyan;

/// Maintenance on the configured database.
///
/// Opening the store creates or upgrades the schema, so every flag works
/// on a fresh path too.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let store = open_store(cfg)?;

    if *migrate {
        migrate_schema(&store)?;
    }
    if *info {
        stats::print_db_info(store.conn(), &cfg.database_path().to_string_lossy())?;
    }
    if *check {
        integrity_check(&store)?;
    }
    if *vacuum {
        println!("{}", Cyan.paint("▶ Compacting database…"));
        store.conn().execute_batch("VACUUM;")?;
        success("Database compacted.");
    }
    if !(*migrate || *info || *check || *vacuum) {
        warning("Nothing to do: pass --migrate, --info, --check or --vacuum.");
    }

    Ok(())
}

fn migrate_schema(store: &RecordStore) -> AppResult<()> {
    run_pending_migrations(store.conn())?;
    let version = user_version(store.conn())?;
    tracing::info!(version, "schema up to date");
    success(format!("Schema at version {version} (latest {SCHEMA_VERSION})."));
    Ok(())
}

fn integrity_check(store: &RecordStore) -> AppResult<()> {
    let result: String = store
        .conn()
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if result == "ok" {
        success("Integrity check passed.");
    } else {
        warning(format!("Integrity check failed: {result}"));
    }
    Ok(())
}
