//! Offline mirror: a CSV "spreadsheet" plus a photo folder tree on disk.

use crate::db::file::write_atomic;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, RemoteRow};
use crate::remote::{CloudClient, FIRST_DATA_ROW, SHEET_HEADERS, record_to_cells, rows_from_cells};
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Directory-backed [`CloudClient`]:
///
/// ```text
/// <root>/registros.csv              header + one row per check-in
/// <root>/fotos/<promotor>/<date>/   uploaded photo bytes
/// ```
#[derive(Debug, Clone)]
pub struct CsvSheet {
    root: PathBuf,
}

impl CsvSheet {
    pub const SHEET_FILE: &'static str = "registros.csv";
    pub const PHOTOS_DIR: &'static str = "fotos";

    /// Open the mirror at `root`, creating the directory and an empty sheet
    /// (header only) when missing.
    pub fn open(root: impl AsRef<Path>) -> AppResult<Self> {
        let sheet = Self {
            root: root.as_ref().to_path_buf(),
        };
        fs::create_dir_all(&sheet.root)?;
        if !sheet.sheet_path().exists() {
            sheet.write_data_rows(&[])?;
            debug!(path = %sheet.sheet_path().display(), "sheet created");
        }
        Ok(sheet)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sheet_path(&self) -> PathBuf {
        self.root.join(Self::SHEET_FILE)
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.root.join(Self::PHOTOS_DIR)
    }

    fn read_data_rows(&self) -> AppResult<Vec<Vec<String>>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(self.sheet_path())?;

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(rec.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn write_data_rows(&self, rows: &[Vec<String>]) -> AppResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        wtr.write_record(SHEET_HEADERS)?;
        for row in rows {
            wtr.write_record(row)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Remote(format!("CSV buffer error: {e}")))?;
        write_atomic(&self.sheet_path(), &bytes)
    }
}

/// Reject absolute paths and `..` so uploads stay under the photo folder.
fn safe_relative(folder_path: &str, file_name: &str) -> AppResult<PathBuf> {
    let rel = Path::new(folder_path).join(file_name);
    let ok = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !ok || file_name.is_empty() {
        return Err(AppError::Remote(format!(
            "invalid photo destination: {}",
            rel.display()
        )));
    }
    Ok(rel)
}

impl CloudClient for CsvSheet {
    fn upload_photo(
        &mut self,
        bytes: &[u8],
        folder_path: &str,
        file_name: &str,
    ) -> AppResult<String> {
        let dest = self.photos_dir().join(safe_relative(folder_path, file_name)?);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, bytes)?;

        let abs = fs::canonicalize(&dest)?;
        info!(path = %abs.display(), bytes = bytes.len(), "photo stored");
        Ok(format!("file://{}", abs.display()))
    }

    fn append_row(&mut self, record: &Record) -> AppResult<bool> {
        let file = OpenOptions::new().append(true).open(self.sheet_path())?;
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(file);
        wtr.write_record(record_to_cells(record))?;
        wtr.flush()?;

        info!(id = %record.id, "row appended to sheet");
        Ok(true)
    }

    fn list_rows(&self) -> AppResult<Vec<RemoteRow>> {
        Ok(rows_from_cells(&self.read_data_rows()?))
    }

    fn delete_row(&mut self, row_number: usize) -> AppResult<bool> {
        let mut rows = self.read_data_rows()?;
        let Some(idx) = row_number.checked_sub(FIRST_DATA_ROW) else {
            return Ok(false);
        };
        if idx >= rows.len() {
            return Ok(false);
        }

        rows.remove(idx);
        self.write_data_rows(&rows)?;
        info!(row_number, "sheet row deleted");
        Ok(true)
    }
}
