// src/export/model.rs

use crate::models::Record;
use serde::Serialize;

/// Flat projection of a record for tabular exports; photos collapse to a count.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub data: String,
    pub hora: String,
    pub promotor: String,
    pub pdv: String,
    pub valor_deslocamento: f64,
    pub num_entradas: u32,
    pub observacoes: String,
    pub num_fotos: usize,
}

impl From<&Record> for RecordExport {
    fn from(r: &Record) -> Self {
        Self {
            data: r.date_str(),
            hora: r.time_str(),
            promotor: r.promotor.clone(),
            pdv: r.pdv.clone(),
            valor_deslocamento: r.valor_deslocamento,
            num_entradas: r.num_entradas,
            observacoes: r.observacoes.clone(),
            num_fotos: r.num_fotos(),
        }
    }
}

/// Column order shared by CSV and XLSX.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "data",
        "hora",
        "promotor",
        "pdv",
        "valor_deslocamento",
        "num_entradas",
        "observacoes",
        "num_fotos",
    ]
}

pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.data.clone(),
        e.hora.clone(),
        e.promotor.clone(),
        e.pdv.clone(),
        format!("{:.2}", e.valor_deslocamento),
        e.num_entradas.to_string(),
        e.observacoes.clone(),
        e.num_fotos.to_string(),
    ]
}
