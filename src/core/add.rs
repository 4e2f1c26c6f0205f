use crate::core::validate::Validator;
use crate::db::Database;
use crate::errors::{AppError, AppResult};
use crate::models::NewRecord;
use crate::remote::{CloudClient, photo_file_name, photo_folder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub id: String,
    /// Photo links stored on the record.
    pub photos: usize,
    /// Whether the sheet row reached the mirror.
    pub mirrored: bool,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate `new`, upload `photos` (when a mirror is given), save the
    /// record locally and finally append it to the mirror sheet.
    ///
    /// The local save is authoritative: mirror failures are logged and
    /// reported through `AddOutcome::mirrored`, never returned as errors.
    /// Without a mirror the photos are referenced by their local paths.
    pub fn apply(
        db: &mut Database,
        validator: &Validator,
        mut new: NewRecord,
        photos: &[PathBuf],
        mut mirror: Option<&mut dyn CloudClient>,
    ) -> AppResult<AddOutcome> {
        validator.promotor_name(&new.promotor)?;
        validator.pdv_name(&new.pdv)?;
        validator.valor_deslocamento(new.valor_deslocamento)?;
        validator.num_entradas(new.num_entradas)?;
        validator.photo_count(new.fotos.len() + photos.len())?;
        for p in photos {
            let size = fs::metadata(p)?.len();
            validator.photo_file(p, size)?;
        }
        new.check()?;

        let id = new.id();
        if db.get_by_id(&id).is_some() {
            return Err(AppError::DuplicateId(id));
        }

        let first_index = new.fotos.len() + 1;
        for (offset, p) in photos.iter().enumerate() {
            let link = match mirror.as_deref_mut() {
                Some(client) => upload(client, &new, p, first_index + offset)?,
                None => local_link(p)?,
            };
            new.fotos.push(link);
        }

        let photos_total = new.fotos.len();
        let id = db.add(new)?;

        let mirrored = match (mirror, db.get_by_id(&id)) {
            (Some(client), Some(record)) => match client.append_row(&record) {
                Ok(ok) => ok,
                Err(e) => {
                    warn!(id = %id, error = %e, "mirror append failed");
                    false
                }
            },
            _ => false,
        };

        info!(id = %id, photos = photos_total, mirrored, "check-in saved");
        Ok(AddOutcome {
            id,
            photos: photos_total,
            mirrored,
        })
    }
}

fn upload(
    client: &mut dyn CloudClient,
    new: &NewRecord,
    path: &Path,
    index: usize,
) -> AppResult<String> {
    let bytes = fs::read(path)?;
    let folder = photo_folder(&new.promotor, &new.data.format("%Y-%m-%d").to_string());
    let name = photo_file_name(&new.pdv, index);
    client.upload_photo(&bytes, &folder, &name)
}

fn local_link(path: &Path) -> AppResult<String> {
    let abs = fs::canonicalize(path)?;
    Ok(abs.to_string_lossy().to_string())
}
