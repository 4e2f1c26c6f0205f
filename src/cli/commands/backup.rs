use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_file_size;
use crate::utils::path::expand_tilde;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { compress } = cmd {
        let db = Database::open(&cfg.database)?;
        let dir = expand_tilde(&cfg.backup_dir);
        let path = BackupLogic::backup(&db, &dir, *compress)?;
        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        success(format!(
            "Backup of {} check-ins created: {} ({})",
            db.len(),
            path.display(),
            format_file_size(size)
        ));
    }

    Ok(())
}
