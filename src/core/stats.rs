//! Read-only reductions over a record collection.

use crate::config::ValueBand;
use crate::models::{Averages, BandCount, PromotorStatistics, Record, Statistics};
use std::collections::BTreeSet;

struct Totals {
    count: usize,
    deslocamento: f64,
    entradas: u64,
    fotos: usize,
}

fn totals<'a, I: IntoIterator<Item = &'a Record>>(records: I) -> Totals {
    records.into_iter().fold(
        Totals {
            count: 0,
            deslocamento: 0.0,
            entradas: 0,
            fotos: 0,
        },
        |mut t, r| {
            t.count += 1;
            t.deslocamento += r.valor_deslocamento;
            t.entradas += u64::from(r.num_entradas);
            t.fotos += r.fotos.len();
            t
        },
    )
}

fn averages(t: &Totals) -> Averages {
    if t.count == 0 {
        return Averages::default();
    }
    let n = t.count as f64;
    Averages {
        media_deslocamento: t.deslocamento / n,
        media_entradas: t.entradas as f64 / n,
        media_fotos: t.fotos as f64 / n,
    }
}

/// Totals, distinct promoters/PDVs and averages for the whole collection.
pub fn statistics(records: &[Record]) -> Statistics {
    let t = totals(records);
    let promotores: BTreeSet<String> = records.iter().map(|r| r.promotor.clone()).collect();
    let pdvs: BTreeSet<String> = records.iter().map(|r| r.pdv.clone()).collect();

    Statistics {
        total_registros: t.count,
        total_promotores: promotores.len(),
        total_pdvs: pdvs.len(),
        total_deslocamento: t.deslocamento,
        total_entradas: t.entradas,
        total_fotos: t.fotos,
        averages: averages(&t),
        promotores,
        pdvs,
    }
}

/// Same figures restricted to records whose `promotor` equals `promotor`.
pub fn promotor_statistics(records: &[Record], promotor: &str) -> PromotorStatistics {
    let own: Vec<&Record> = records.iter().filter(|r| r.promotor == promotor).collect();
    let t = totals(own.iter().copied());

    PromotorStatistics {
        promotor: promotor.to_string(),
        total_visitas: t.count,
        total_deslocamento: t.deslocamento,
        total_entradas: t.entradas,
        total_fotos: t.fotos,
        pdvs_visitados: own.iter().map(|r| r.pdv.clone()).collect(),
        averages: averages(&t),
    }
}

/// Count and sum of travel cost per configured band, in band order.
/// A record falls in the first band that contains its value.
pub fn band_counts(records: &[Record], bands: &[ValueBand]) -> Vec<BandCount> {
    let mut out: Vec<BandCount> = bands
        .iter()
        .map(|b| BandCount {
            label: b.label.clone(),
            count: 0,
            total: 0.0,
        })
        .collect();

    for r in records {
        if let Some(i) = bands.iter().position(|b| b.contains(r.valor_deslocamento)) {
            out[i].count += 1;
            out[i].total += r.valor_deslocamento;
        }
    }

    out
}
