use crate::db::Database;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the store into `dir` and return the file written.
    ///
    /// With `compress` the JSON snapshot is replaced by a `.zip` holding it.
    pub fn backup(db: &Database, dir: &Path, compress: bool) -> AppResult<PathBuf> {
        let json = db.backup(dir)?;

        if !compress {
            return Ok(json);
        }

        let zip_path = compress_backup(&json)?;
        if let Err(e) = fs::remove_file(&json) {
            warn!(path = %json.display(), error = %e, "could not remove uncompressed backup");
        }
        Ok(zip_path)
    }
}

/// Zip `path` next to itself (same stem, `.zip` extension).
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("invalid backup path: {}", path.display())))?;

    let file = fs::File::create_new(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    let mut src = fs::File::open(path)?;
    io::copy(&mut src, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info!(path = %zip_path.display(), "backup compressed");
    Ok(zip_path)
}
