use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut db = Database::open(&cfg.database)?;

        if db.get_by_id(id).is_none() {
            warning(format!("No check-in with id '{id}'."));
            return Ok(());
        }

        if !*yes
            && !ask_confirmation(&format!(
                "Delete check-in '{id}'? This action is irreversible."
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        if db.delete(id)? {
            success(format!("Check-in '{id}' has been deleted."));
        }
    }

    Ok(())
}
