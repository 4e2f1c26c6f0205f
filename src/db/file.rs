//! Backing-file helpers: lenient load and atomic whole-file rewrite.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Outcome of reading a backing file.
#[derive(Debug)]
pub enum Loaded<T> {
    Ok(T),
    Missing,
    /// The file existed but did not parse; it was moved to `moved_to`
    /// (or left in place when the move failed).
    Corrupt { moved_to: Option<PathBuf> },
}

/// Read and deserialize a JSON file without treating absence or corruption
/// as errors. Any other I/O failure (permissions, ...) is returned.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<Loaded<T>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice::<T>(&bytes) {
        Ok(v) => Ok(Loaded::Ok(v)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "backing file is unparsable");
            Ok(Loaded::Corrupt {
                moved_to: quarantine(path),
            })
        }
    }
}

/// Move an unparsable file aside as `<name>.corrupt-<YYYYMMDD_HHMMSS>`.
fn quarantine(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let target = path.with_file_name(format!("{name}.corrupt-{stamp}"));

    match fs::rename(path, &target) {
        Ok(()) => {
            warn!(from = %path.display(), to = %target.display(), "corrupt file moved aside");
            Some(target)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not move corrupt file aside");
            None
        }
    }
}

/// Serialize `value` as pretty JSON and replace `path` atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| AppError::StorageWrite {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Write to a temp file in the same directory, flush it, then rename over
/// `path`. Readers see either the old or the new content, never a mix.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let storage_err = |source: io::Error| AppError::StorageWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(storage_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(storage_err)?;
    tmp.write_all(bytes).map_err(storage_err)?;
    tmp.as_file().sync_all().map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "file rewritten");
    Ok(())
}
