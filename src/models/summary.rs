use serde::Serialize;
use std::collections::BTreeSet;

/// Zero-guarded per-record means.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Averages {
    pub media_deslocamento: f64,
    pub media_entradas: f64,
    pub media_fotos: f64,
}

/// Statistics over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_registros: usize,
    pub total_promotores: usize,
    pub total_pdvs: usize,
    pub total_deslocamento: f64,
    pub total_entradas: u64,
    pub total_fotos: usize,
    pub promotores: BTreeSet<String>,
    pub pdvs: BTreeSet<String>,
    #[serde(flatten)]
    pub averages: Averages,
}

/// Statistics scoped to one promoter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromotorStatistics {
    pub promotor: String,
    pub total_visitas: usize,
    pub total_deslocamento: f64,
    pub total_entradas: u64,
    pub total_fotos: usize,
    pub pdvs_visitados: BTreeSet<String>,
    #[serde(flatten)]
    pub averages: Averages,
}

/// Number of records whose travel cost falls in one configured band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub label: String,
    pub count: usize,
    pub total: f64,
}
