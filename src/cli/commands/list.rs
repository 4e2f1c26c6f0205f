use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Database;
use crate::errors::AppResult;
use crate::models::Record;
use crate::ui::messages::{header, info};
use crate::utils::date::{self, Period};
use crate::utils::formatting::{format_currency, format_date};
use crate::utils::table::Table;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date: date_arg,
        promotor,
        pdv,
        period,
        range,
        json,
    } = cmd
    {
        let db = Database::open(&cfg.database)?;

        let mut title = "Check-ins".to_string();
        let mut records = if let Some(d) = date_arg {
            db.get_by_date(date::require_date(d)?)
        } else if let Some(p) = period {
            let (start, end) = p.bounds(date::today());
            title = match p {
                Period::Daily => format!("Check-ins {}", format_date(&start)),
                Period::Weekly => format!("Check-ins, semana {}", date::week_number(start)),
                Period::Monthly => {
                    format!("Check-ins, {} {}", date::month_name(start), start.year())
                }
            };
            db.get_by_date_range(start, end)
        } else if let Some(r) = range {
            let (start, end) = date::parse_range(r)?;
            db.get_by_date_range(start, end)
        } else {
            db.get_all()
        };

        if let Some(p) = promotor {
            records.retain(|r| &r.promotor == p);
        }
        if let Some(p) = pdv {
            records.retain(|r| &r.pdv == p);
        }

        sort_newest_first(&mut records);

        if *json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if records.is_empty() {
            info("No check-ins found.");
            return Ok(());
        }

        header(format!("{title} ({})", records.len()));
        print!("{}", render(&records, &cfg.currency));
    }
    Ok(())
}

/// Newest `(data, hora)` first; insertion order breaks ties.
pub(crate) fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| (b.data, b.hora).cmp(&(a.data, a.hora)));
}

fn render(records: &[Record], currency: &str) -> String {
    let mut table = Table::new(&[
        "Data", "Hora", "Promotor", "PDV", "Valor", "Entradas", "Fotos", "ID",
    ]);
    for r in records {
        table.add_row(vec![
            format_date(&r.data),
            r.time_str(),
            r.promotor.clone(),
            r.pdv.clone(),
            format_currency(currency, r.valor_deslocamento),
            r.num_entradas.to_string(),
            r.num_fotos().to_string(),
            r.id.clone(),
        ]);
    }
    table.render()
}
