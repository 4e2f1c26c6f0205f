// src/export/csv.rs

use crate::db::file::write_atomic;
use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;
use crate::models::Record;
use std::path::Path;
use tracing::debug;

/// CSV bytes for `records`, header row first (derived from `RecordExport`).
pub fn records_to_csv(records: &[Record]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for r in records {
        wtr.serialize(RecordExport::from(r))?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV buffer error: {e}")))
}

/// Write the flattened CSV of `records` to `path`.
pub fn write_records_csv(path: &Path, records: &[Record]) -> AppResult<()> {
    let bytes = records_to_csv(records)?;
    write_atomic(path, &bytes)?;
    debug!(path = %path.display(), rows = records.len(), "csv written");
    Ok(())
}
