use crate::core::stats;
use crate::db::file::{Loaded, load_json, write_json};
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_records_csv;
use crate::models::{NewRecord, PromotorStatistics, Record, RecordPatch, Statistics};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Local record store backed by a single JSON array file.
///
/// Every mutation builds the next collection aside, rewrites the whole file
/// and only then swaps it in, so `records` always matches the last content
/// that reached the disk. Single writer only: two processes on the same file
/// overwrite each other at whole-file granularity.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    records: Vec<Record>,
}

impl Database {
    /// Open (or create) the store at `path`.
    ///
    /// A missing or unparsable file yields an empty store and a fresh file;
    /// an unparsable one is first moved aside. Neither case is an error.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match load_json::<Vec<Record>>(&path)? {
            Loaded::Ok(records) => {
                debug!(path = %path.display(), count = records.len(), "records loaded");
                return Ok(Self { path, records });
            }
            Loaded::Missing => {
                debug!(path = %path.display(), "no backing file, starting empty");
                Vec::new()
            }
            Loaded::Corrupt { moved_to } => {
                warn!(
                    path = %path.display(),
                    moved_to = ?moved_to,
                    "reinitializing store after unparsable backing file"
                );
                Vec::new()
            }
        };

        write_json(&path, &records)?;
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view of the collection, insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Insert a check-in and return its id.
    pub fn add(&mut self, new: NewRecord) -> AppResult<String> {
        new.check()?;

        let id = new.id();
        if self.records.iter().any(|r| r.id == id) {
            return Err(AppError::DuplicateId(id));
        }

        let record = new.into_record(Local::now().naive_local());
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)?;

        info!(id = %id, "record added");
        Ok(id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Record> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn get_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Vec<Record> {
        self.filter(|r| r.data == date)
    }

    pub fn get_by_promotor(&self, promotor: &str) -> Vec<Record> {
        self.filter(|r| r.promotor == promotor)
    }

    pub fn get_by_pdv(&self, pdv: &str) -> Vec<Record> {
        self.filter(|r| r.pdv == pdv)
    }

    /// Records with `start <= data <= end`.
    pub fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Record> {
        self.filter(|r| start <= r.data && r.data <= end)
    }

    fn filter<F: Fn(&Record) -> bool>(&self, pred: F) -> Vec<Record> {
        self.records.iter().filter(|r| pred(r)).cloned().collect()
    }

    /// Merge `patch` into the record `id`. Returns `false` when not found.
    pub fn update(&mut self, id: &str, patch: &RecordPatch) -> AppResult<bool> {
        patch.check()?;

        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        patch.apply(&mut next[idx]);
        next[idx].updated_at = Some(Local::now().naive_local());
        self.commit(next)?;

        info!(id = %id, "record updated");
        Ok(true)
    }

    /// Remove the record `id`. Returns `false` (and writes nothing) when absent.
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        next.remove(idx);
        self.commit(next)?;

        info!(id = %id, "record deleted");
        Ok(true)
    }

    /// Drop every record. Irreversible at this layer; take a backup first.
    pub fn clear_all(&mut self) -> AppResult<()> {
        let removed = self.records.len();
        self.commit(Vec::new())?;
        info!(removed, "store cleared");
        Ok(())
    }

    /// Write the current collection to `dir/backup_YYYYMMDD_HHMMSS.json`.
    /// A numeric suffix is added if that name, or its `.zip` form, is taken.
    pub fn backup(&self, dir: &Path) -> AppResult<PathBuf> {
        fs::create_dir_all(dir)?;

        let stem = format!("backup_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let mut target = dir.join(format!("{stem}.json"));
        let mut n = 1;
        while target.exists() || target.with_extension("zip").exists() {
            target = dir.join(format!("{stem}_{n}.json"));
            n += 1;
        }

        write_json(&target, &self.records)?;
        info!(path = %target.display(), count = self.records.len(), "backup written");
        Ok(target)
    }

    /// Flattened CSV of all records. Writes nothing and returns `false`
    /// when the store is empty.
    pub fn export_csv(&self, path: &Path) -> AppResult<bool> {
        if self.records.is_empty() {
            return Ok(false);
        }
        write_records_csv(path, &self.records)?;
        Ok(true)
    }

    pub fn statistics(&self) -> Statistics {
        stats::statistics(&self.records)
    }

    pub fn statistics_for_promotor(&self, promotor: &str) -> PromotorStatistics {
        stats::promotor_statistics(&self.records, promotor)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn commit(&mut self, next: Vec<Record>) -> AppResult<()> {
        write_json(&self.path, &next)?;
        self.records = next;
        Ok(())
    }
}
