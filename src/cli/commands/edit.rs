use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::validate::Validator;
use crate::db::Database;
use crate::errors::AppResult;
use crate::models::RecordPatch;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

/// Patch the given fields of a check-in; the id never changes.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date: date_arg,
        time,
        promotor,
        pdv,
        valor,
        entradas,
        obs,
    } = cmd
    {
        let patch = RecordPatch {
            data: date_arg.as_deref().map(date::require_date).transpose()?,
            hora: time.as_deref().map(date::require_time).transpose()?,
            promotor: promotor.as_ref().map(|s| s.trim().to_string()),
            pdv: pdv.as_ref().map(|s| s.trim().to_string()),
            valor_deslocamento: *valor,
            num_entradas: *entradas,
            observacoes: obs.as_ref().map(|s| s.trim().to_string()),
            fotos: None,
        };

        if patch.is_empty() {
            info("Nothing to change.");
            return Ok(());
        }

        let validator = Validator::from_config(cfg)?;
        if let Some(p) = &patch.promotor {
            validator.promotor_name(p)?;
        }
        if let Some(p) = &patch.pdv {
            validator.pdv_name(p)?;
        }
        if let Some(v) = patch.valor_deslocamento {
            validator.valor_deslocamento(v)?;
        }
        if let Some(n) = patch.num_entradas {
            validator.num_entradas(n)?;
        }

        let mut db = Database::open(&cfg.database)?;
        if db.update(id, &patch)? {
            success(format!("Check-in '{id}' updated."));
        } else {
            warning(format!("No check-in with id '{id}'."));
        }
    }
    Ok(())
}
