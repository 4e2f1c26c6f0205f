// src/export/json.rs

use crate::db::file::write_json;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::Record;
use crate::ui::messages::info;
use std::path::Path;

/// Full records, same shape as the backing file.
pub(crate) fn export_json(records: &[Record], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));
    write_json(path, &records)?;
    notify_export_success("JSON", path);
    Ok(())
}
