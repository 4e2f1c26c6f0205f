// src/export/logic.rs

use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_records_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, RecordExport, notify_export_success};
use crate::models::Record;
use crate::ui::messages::{info, warning};
use crate::utils::date::parse_range;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the store's records.
    ///
    /// - `file` must be an absolute path
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `a:b`
    ///
    /// Returns `false` when nothing matched and no file was written.
    pub fn export(
        db: &Database,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<bool> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let records: Vec<Record> = match range {
            None => db.get_all(),
            Some(r) if r.eq_ignore_ascii_case("all") => db.get_all(),
            Some(r) => {
                let (start, end) = parse_range(r)?;
                db.get_by_date_range(start, end)
            }
        };

        if records.is_empty() {
            warning("No records found for the selected range.");
            return Ok(false);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => {
                info(format!("Exporting to CSV: {}", path.display()));
                write_records_csv(path, &records)?;
                notify_export_success("CSV", path);
            }
            ExportFormat::Json => export_json(&records, path)?,
            ExportFormat::Xlsx => {
                let rows: Vec<RecordExport> = records.iter().map(RecordExport::from).collect();
                export_xlsx(&rows, path)?;
            }
        }

        Ok(true)
    }
}
