pub mod add;
pub mod backup;
pub mod config;
pub mod count;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod outcomes;
pub mod prune;
pub mod remind;
pub mod show;
pub mod watch;

use crate::config::Config;
use crate::core::store::RecordStore;
use crate::errors::AppResult;

/// Open the configured database, creating the schema when needed.
pub(crate) fn open_store(cfg: &Config) -> AppResult<RecordStore> {
    RecordStore::open(cfg.database_path())
}
