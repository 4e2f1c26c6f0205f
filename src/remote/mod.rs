//! Boundary with the remote mirror (spreadsheet + photo storage).
//!
//! The store never calls a client itself; handlers push a record to the
//! mirror after it was saved locally and read rows back for duplicate review.

pub mod sheet;

use crate::errors::AppResult;
use crate::models::{Record, RemoteRow};

pub use sheet::CsvSheet;

/// Spreadsheet header, one entry per column A..H.
pub const SHEET_HEADERS: [&str; 8] = [
    "Data",
    "Hora",
    "Promotor",
    "PDV",
    "Valor Deslocamento",
    "Número de Entradas",
    "Observações",
    "Links das Fotos",
];

/// Row number of the first data row (row 1 holds the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Operations a mirror backend provides. Calls are synchronous from the
/// caller's point of view; retries and timeouts belong to the implementation.
pub trait CloudClient {
    /// Store `bytes` under `folder_path/file_name` and return a shareable link.
    fn upload_photo(&mut self, bytes: &[u8], folder_path: &str, file_name: &str)
    -> AppResult<String>;

    /// Append one record as a sheet row.
    fn append_row(&mut self, record: &Record) -> AppResult<bool>;

    /// Every data row, in sheet order.
    fn list_rows(&self) -> AppResult<Vec<RemoteRow>>;

    /// Delete the row `row_number`; `false` when no such row exists.
    fn delete_row(&mut self, row_number: usize) -> AppResult<bool>;
}

/// Sheet cells for `record`, columns A..H; photo links are newline-joined.
pub fn record_to_cells(record: &Record) -> Vec<String> {
    vec![
        record.date_str(),
        record.time_str(),
        record.promotor.clone(),
        record.pdv.clone(),
        record.valor_deslocamento.to_string(),
        record.num_entradas.to_string(),
        record.observacoes.clone(),
        record.fotos.join("\n"),
    ]
}

/// Parse raw data rows (header excluded) into remote rows, skipping the
/// ones that are too short.
pub fn rows_from_cells(rows: &[Vec<String>]) -> Vec<RemoteRow> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, cells)| RemoteRow::from_cells(i + FIRST_DATA_ROW, cells))
        .collect()
}

/// Replace every character outside `[a-zA-Z0-9]` with `_`.
pub fn clean_name(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Remote folder for a check-in's photos: `{promotor}/{YYYY-MM-DD}`.
pub fn photo_folder(promotor: &str, data: &str) -> String {
    format!("{}/{}", clean_name(promotor), data)
}

/// Remote file name of the `index`-th (1-based) photo: `{pdv}_{index:03}.jpg`.
pub fn photo_file_name(pdv: &str, index: usize) -> String {
    format!("{}_{:03}.jpg", clean_name(pdv), index)
}
