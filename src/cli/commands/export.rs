use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let db = Database::open(&cfg.database)?;
        ExportLogic::export(&db, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
