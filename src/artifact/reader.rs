//! Artifact reader - loads and validates `RobynModel-*.json` files

use std::fs;
use std::path::Path;

use tracing::info;

use super::{Artifact, Origin, MODEL_FILE_EXTENSION};
use crate::snapshot::{RestoreStep, Snapshot};
use crate::{Error, Result};

/// Read and validate an artifact file.
///
/// # Arguments
///
/// * `path` - Artifact file; must end in `.json` (any case)
/// * `step` - `Inputs` needs only `InputCollect`; `Full` also needs `ExportedModel`
/// * `quiet` - Suppress the confirmation event
///
/// # Errors
///
/// Returns `InvalidExtension`, `FileNotFound`, `InvalidJson`, or
/// `MissingSection`, each naming `path`.
pub fn read_model(path: impl AsRef<Path>, step: RestoreStep, quiet: bool) -> Result<Artifact> {
    let path = path.as_ref();

    let has_json_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MODEL_FILE_EXTENSION));
    if !has_json_extension {
        return Err(Error::InvalidExtension(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let snapshot = Snapshot::from_json_str(&contents, step, path)?;

    if !quiet {
        info!("Imported JSON file successfully: {}", path.display());
    }

    Ok(Artifact::new(snapshot, path.to_path_buf(), Origin::Read))
}
