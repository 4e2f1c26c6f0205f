use crate::cli::commands::open_mirror;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::validate::Validator;
use crate::db::Database;
use crate::errors::AppResult;
use crate::models::NewRecord;
use crate::remote::CloudClient;
use crate::ui::messages::{success, warning};
use crate::utils::date;
use crate::utils::formatting::format_currency;
use chrono::Local;

/// Register a check-in.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        promotor,
        pdv,
        valor,
        entradas,
        obs,
        date: date_arg,
        time,
        photos,
        no_mirror,
    } = cmd
    {
        let now = Local::now().naive_local();
        let d = match date_arg {
            Some(s) => date::require_date(s)?,
            None => now.date(),
        };
        let t = match time {
            Some(s) => date::require_time(s)?,
            None => now.time(),
        };

        let mut new = NewRecord::new(d, t, promotor.trim(), pdv.trim());
        new.valor_deslocamento = valor.unwrap_or(cfg.default_valor_deslocamento);
        new.num_entradas = *entradas;
        new.observacoes = obs.trim().to_string();

        if !cfg.promotores.iter().any(|p| p == &new.promotor) {
            warning(format!("'{}' is not in the promoter roster", new.promotor));
        }
        if !cfg.pdvs.iter().any(|p| p == &new.pdv) {
            warning(format!("'{}' is not in the PDV roster", new.pdv));
        }

        let validator = Validator::from_config(cfg)?;
        let mut db = Database::open(&cfg.database)?;

        let mut sheet = if *no_mirror { None } else { open_mirror(cfg)? };
        let mirror = sheet.as_mut().map(|s| s as &mut dyn CloudClient);
        let mirror_configured = mirror.is_some();

        let valor_display = format_currency(&cfg.currency, new.valor_deslocamento);
        let outcome = AddLogic::apply(&mut db, &validator, new, photos, mirror)?;

        success(format!(
            "Check-in saved: {} ({valor_display}, {} photo(s))",
            outcome.id, outcome.photos
        ));
        if mirror_configured && !outcome.mirrored {
            warning("Saved locally only: the mirror could not be updated.");
        }
    }

    Ok(())
}
