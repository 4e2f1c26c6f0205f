use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::band_counts;
use crate::db::Database;
use crate::errors::AppResult;
use crate::models::{BandCount, PromotorStatistics, Statistics};
use crate::ui::messages::{header, info};
use crate::utils::formatting::{format_currency, pad_left, pad_right};
use serde::Serialize;

#[derive(Serialize)]
struct GlobalReport {
    #[serde(flatten)]
    statistics: Statistics,
    faixas_valor: Vec<BandCount>,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { promotor, json } = cmd {
        let db = Database::open(&cfg.database)?;

        match promotor {
            Some(name) => {
                let s = db.statistics_for_promotor(name);
                if *json {
                    println!("{}", serde_json::to_string_pretty(&s)?);
                } else if s.total_visitas == 0 {
                    info(format!("No check-ins for '{name}'."));
                } else {
                    print_promotor(&s, &cfg.currency);
                }
            }
            None => {
                let report = GlobalReport {
                    statistics: db.statistics(),
                    faixas_valor: band_counts(db.records(), &cfg.value_bands),
                };
                if *json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else if report.statistics.total_registros == 0 {
                    info("No check-ins recorded yet.");
                } else {
                    print_global(&report, &cfg.currency);
                }
            }
        }
    }
    Ok(())
}

fn print_global(r: &GlobalReport, currency: &str) {
    let s = &r.statistics;
    header("Statistics");
    println!("Check-ins        : {}", s.total_registros);
    println!("Promoters        : {}", s.total_promotores);
    println!("PDVs             : {}", s.total_pdvs);
    println!(
        "Travel cost      : {} (avg {})",
        format_currency(currency, s.total_deslocamento),
        format_currency(currency, s.averages.media_deslocamento)
    );
    println!(
        "Entries          : {} (avg {:.2})",
        s.total_entradas, s.averages.media_entradas
    );
    println!(
        "Photos           : {} (avg {:.2})",
        s.total_fotos, s.averages.media_fotos
    );

    println!();
    println!("Travel cost bands:");
    let width = r
        .faixas_valor
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    for b in &r.faixas_valor {
        println!(
            "  {} {} {}",
            pad_right(&b.label, width),
            pad_left(&b.count.to_string(), 5),
            format_currency(currency, b.total)
        );
    }
}

fn print_promotor(s: &PromotorStatistics, currency: &str) {
    header(format!("Statistics for {}", s.promotor));
    println!("Visits           : {}", s.total_visitas);
    println!(
        "Travel cost      : {} (avg {})",
        format_currency(currency, s.total_deslocamento),
        format_currency(currency, s.averages.media_deslocamento)
    );
    println!(
        "Entries          : {} (avg {:.2})",
        s.total_entradas, s.averages.media_entradas
    );
    println!(
        "Photos           : {} (avg {:.2})",
        s.total_fotos, s.averages.media_fotos
    );
    let pdvs: Vec<&str> = s.pdvs_visitados.iter().map(String::as_str).collect();
    println!("PDVs visited     : {}", pdvs.join(", "));
}
