use crate::cli::parser::{Commands, RosterAction};
use crate::config::Config;
use crate::core::validate::Validator;
use crate::errors::AppResult;
use crate::ui::messages::{header, success, warning};

/// `promotor` and `pdv` subcommands: edit the rosters kept in the configuration.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (action, is_promotor) = match cmd {
        Commands::Promotor { action } => (action, true),
        Commands::Pdv { action } => (action, false),
        _ => return Ok(()),
    };
    let kind = if is_promotor { "promoter" } else { "PDV" };

    let mut cfg = cfg.clone();
    match action {
        RosterAction::List => {
            let names = if is_promotor { &cfg.promotores } else { &cfg.pdvs };
            header(format!("{} roster ({})", kind, names.len()));
            for n in names {
                println!("  {n}");
            }
        }
        RosterAction::Add { name } => {
            let name = name.trim();
            let validator = Validator::from_config(&cfg)?;
            if is_promotor {
                validator.promotor_name(name)?;
                cfg.add_promotor(name)?;
            } else {
                validator.pdv_name(name)?;
                cfg.add_pdv(name)?;
            }
            cfg.save()?;
            success(format!("Added {kind} '{name}'."));
        }
        RosterAction::Remove { name } => {
            let removed = if is_promotor {
                cfg.remove_promotor(name)
            } else {
                cfg.remove_pdv(name)
            };
            if removed {
                cfg.save()?;
                success(format!("Removed {kind} '{name}'."));
            } else {
                warning(format!("No {kind} named '{name}'."));
            }
        }
    }
    Ok(())
}
