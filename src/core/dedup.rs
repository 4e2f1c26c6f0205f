//! Near-duplicate detection over the rows of the remote mirror.
//!
//! Two rows describe the same check-in when promoter, PDV and date match
//! exactly and the times are at most `window` apart. Without a window any
//! two times on the same day match. The earlier row is kept as the original.

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{DuplicatePair, RemoteRow};
use crate::remote::CloudClient;
use chrono::{NaiveTime, TimeDelta};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRule {
    pub window: Option<TimeDelta>,
}

impl DuplicateRule {
    pub fn within_minutes(minutes: u32) -> Self {
        Self {
            window: Some(TimeDelta::minutes(i64::from(minutes))),
        }
    }

    pub fn same_day() -> Self {
        Self { window: None }
    }

    pub fn from_config(cfg: &Config) -> Self {
        match cfg.duplicate_window_minutes {
            Some(m) => Self::within_minutes(m),
            None => Self::same_day(),
        }
    }

    pub fn matches(&self, a: &RemoteRow, b: &RemoteRow) -> bool {
        if a.promotor.trim() != b.promotor.trim()
            || a.pdv.trim() != b.pdv.trim()
            || a.data.trim() != b.data.trim()
        {
            return false;
        }

        let Some(window) = self.window else {
            return true;
        };

        match (parse_hora(&a.hora), parse_hora(&b.hora)) {
            (Some(x), Some(y)) => (x - y).abs() <= window,
            _ => a.hora.trim() == b.hora.trim(),
        }
    }
}

fn parse_hora(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Whether `a` happened before `b`; falls back to row order on equal or
/// unparsable times.
fn is_earlier(a: &RemoteRow, b: &RemoteRow) -> bool {
    match (parse_hora(&a.hora), parse_hora(&b.hora)) {
        (Some(x), Some(y)) if x != y => x < y,
        _ => a.row_number < b.row_number,
    }
}

/// Scan `rows` in order and pair each row with the first earlier,
/// still-unflagged row it matches. A row is flagged as duplicate at most
/// once and a flagged row is never used as an original. A row already kept
/// as an original stays kept even when a later-listed match is earlier.
pub fn find_duplicates(rows: &[RemoteRow], rule: &DuplicateRule) -> Vec<DuplicatePair> {
    let mut flagged = vec![false; rows.len()];
    let mut kept = vec![false; rows.len()];
    let mut pairs = Vec::new();

    for j in 0..rows.len() {
        if flagged[j] {
            continue;
        }
        for i in 0..j {
            if flagged[i] || !rule.matches(&rows[i], &rows[j]) {
                continue;
            }

            let (orig, dup) = if !kept[i] && is_earlier(&rows[j], &rows[i]) {
                (j, i)
            } else {
                (i, j)
            };
            flagged[dup] = true;
            kept[orig] = true;
            debug!(
                original = rows[orig].row_number,
                duplicate = rows[dup].row_number,
                "duplicate found"
            );
            pairs.push(DuplicatePair {
                original: rows[orig].clone(),
                duplicate: rows[dup].clone(),
            });
            break;
        }
    }

    pairs
}

/// Row numbers to delete for `pairs`, highest first, so that each deletion
/// leaves the remaining numbers valid.
pub fn purge_order(pairs: &[DuplicatePair]) -> Vec<usize> {
    let mut rows: Vec<usize> = pairs.iter().map(|p| p.duplicate.row_number).collect();
    rows.sort_unstable_by(|a, b| b.cmp(a));
    rows.dedup();
    rows
}

/// Delete every flagged duplicate through `client`. Returns, per row number,
/// whether the row was still there.
pub fn purge_duplicates(
    client: &mut dyn CloudClient,
    pairs: &[DuplicatePair],
) -> AppResult<Vec<(usize, bool)>> {
    let mut report = Vec::new();
    for row in purge_order(pairs) {
        let deleted = client.delete_row(row)?;
        if deleted {
            info!(row, "duplicate row deleted");
        } else {
            warn!(row, "duplicate row already absent");
        }
        report.push((row, deleted));
    }
    Ok(report)
}
