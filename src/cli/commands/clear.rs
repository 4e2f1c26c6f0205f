use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        let mut db = Database::open(&cfg.database)?;

        if db.is_empty() {
            info("No check-ins to delete.");
            return Ok(());
        }

        let prompt = format!(
            "Delete ALL {} check-ins? Run `pdvcontrol backup` first if unsure.",
            db.len()
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = db.len();
        db.clear_all()?;
        success(format!("{removed} check-ins deleted."));
    }

    Ok(())
}
