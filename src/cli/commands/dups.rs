use crate::cli::commands::{ask_confirmation, open_mirror};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dedup::{DuplicateRule, find_duplicates, purge_duplicates};
use crate::errors::{AppError, AppResult};
use crate::models::DuplicatePair;
use crate::remote::CloudClient;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::table::Table;

/// Review duplicates in the mirror sheet and optionally delete rows.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dups { delete, purge, yes } = cmd {
        let Some(mut sheet) = open_mirror(cfg)? else {
            return Err(AppError::Config(
                "no mirror configured (set `mirror_dir` in the configuration)".to_string(),
            ));
        };

        if !delete.is_empty() {
            let mut rows = delete.clone();
            rows.sort_unstable_by(|a, b| b.cmp(a));
            rows.dedup();

            if !*yes && !ask_confirmation(&format!("Delete sheet rows {rows:?}?")) {
                info("Operation cancelled.");
                return Ok(());
            }
            for row in rows {
                report(row, sheet.delete_row(row)?);
            }
            return Ok(());
        }

        let rule = DuplicateRule::from_config(cfg);
        let pairs = find_duplicates(&sheet.list_rows()?, &rule);

        if pairs.is_empty() {
            success("No duplicates found.");
            return Ok(());
        }

        header(format!("Duplicates ({})", pairs.len()));
        print!("{}", render(&pairs));

        if *purge {
            if !*yes
                && !ask_confirmation(&format!("Delete {} duplicate row(s)?", pairs.len()))
            {
                info("Operation cancelled.");
                return Ok(());
            }
            for (row, deleted) in purge_duplicates(&mut sheet, &pairs)? {
                report(row, deleted);
            }
        }
    }
    Ok(())
}

fn report(row: usize, deleted: bool) {
    if deleted {
        success(format!("Row {row} deleted."));
    } else {
        warning(format!("Row {row} not found."));
    }
}

fn render(pairs: &[DuplicatePair]) -> String {
    let mut table = Table::new(&["Original", "Duplicate", "Data", "Promotor", "PDV", "Horas"]);
    for p in pairs {
        table.add_row(vec![
            p.original.row_number.to_string(),
            p.duplicate.row_number.to_string(),
            p.original.data.clone(),
            p.original.promotor.clone(),
            p.original.pdv.clone(),
            format!("{} / {}", p.original.hora, p.duplicate.hora),
        ]);
    }
    table.render()
}
