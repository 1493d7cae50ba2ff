use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        limit,
        range,
        force,
    } = cmd
    {
        let store = open_store(cfg)?;
        ExportLogic::export(&store, *format, file, range.as_deref(), *limit, *force)?;
    }
    Ok(())
}
