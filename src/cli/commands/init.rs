use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` command
///
/// Writes a fresh configuration file at `config_path` and creates the
/// record file it points to (an existing one is kept as is).
pub fn handle(cli: &Cli, config_path: &Path) -> AppResult<()> {
    let cfg = Config::init_all(config_path, cli.db.as_deref())?;

    info("Initializing pdvcontrol…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Records    : {}", cfg.database);

    let db = Database::open(&cfg.database)?;

    success(format!(
        "Record file ready at {} ({} check-ins)",
        db.path().display(),
        db.len()
    ));
    Ok(())
}
