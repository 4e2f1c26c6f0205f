use serde::Serialize;
use tracing::warn;

/// Minimum number of cells a sheet row needs to be ingested
/// (data, hora, promotor, pdv, valor_deslocamento).
pub const MIN_CELLS: usize = 5;

/// A row read back from the remote spreadsheet, addressed by its 1-based
/// row number (row 1 is the header).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteRow {
    pub row_number: usize,
    pub data: String,
    pub hora: String,
    pub promotor: String,
    pub pdv: String,
    pub valor_deslocamento: f64,
    pub num_entradas: u32,
    pub observacoes: String,
    pub fotos: Vec<String>,
}

impl RemoteRow {
    /// Build a row from raw sheet cells.
    ///
    /// Rows shorter than [`MIN_CELLS`] are skipped (`None`). Malformed numeric
    /// cells fall back to `0.0` / `1` instead of failing the whole read.
    pub fn from_cells(row_number: usize, cells: &[String]) -> Option<Self> {
        if cells.len() < MIN_CELLS {
            warn!(row_number, cells = cells.len(), "skipping short sheet row");
            return None;
        }

        let cell = |i: usize| cells.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

        let valor_deslocamento = parse_valor(&cell(4)).unwrap_or_else(|| {
            warn!(row_number, raw = %cell(4), "unparsable valor_deslocamento, using 0");
            0.0
        });

        let num_entradas = match cells.get(5) {
            None => 1,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    warn!(row_number, raw = %raw, "unparsable num_entradas, using 1");
                    1
                }
            },
        };

        let fotos = cells
            .get(7)
            .map(|s| {
                s.split('\n')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            row_number,
            data: cell(0),
            hora: cell(1),
            promotor: cell(2),
            pdv: cell(3),
            valor_deslocamento,
            num_entradas,
            observacoes: cells.get(6).cloned().unwrap_or_default(),
            fotos,
        })
    }
}

/// Accepts `50`, `50.5` and the comma-decimal `50,5` a pt-BR sheet returns.
fn parse_valor(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>()
        .or_else(|_| raw.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|v| v.is_finite())
}

/// One duplicate finding: `original` is kept, `duplicate` is the candidate
/// for deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair {
    pub original: RemoteRow,
    pub duplicate: RemoteRow,
}
