use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::formatting::{format_currency, format_date, format_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let db = Database::open(&cfg.database)?;

        let Some(r) = db.get_by_id(id) else {
            warning(format!("No check-in with id '{id}'."));
            return Ok(());
        };

        header(&r.id);
        println!("Data        : {}", format_date(&r.data));
        println!("Hora        : {}", r.time_str());
        println!("Promotor    : {}", r.promotor);
        println!("PDV         : {}", r.pdv);
        println!(
            "Deslocamento: {}",
            format_currency(&cfg.currency, r.valor_deslocamento)
        );
        println!("Entradas    : {}", r.num_entradas);
        if !r.observacoes.is_empty() {
            let lines = textwrap::wrap(&r.observacoes, 60);
            for (i, l) in lines.iter().enumerate() {
                let label = if i == 0 { "Observações :" } else { "             " };
                println!("{label} {l}");
            }
        }
        println!("Criado em   : {}", format_datetime(&r.created_at));
        if let Some(u) = &r.updated_at {
            println!("Atualizado  : {}", format_datetime(u));
        }
        if r.fotos.is_empty() {
            println!("Fotos       : -");
        } else {
            println!("Fotos       :");
            for link in &r.fotos {
                println!("  - {link}");
            }
        }
    }
    Ok(())
}
