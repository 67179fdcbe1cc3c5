//! Artifact writer - serializes snapshots to `RobynModel-<selector>.json`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Artifact, Origin, MODEL_FILE_EXTENSION, MODEL_FILE_PREFIX};
use crate::session::{InputCollect, OutputCollect};
use crate::snapshot::{self, Snapshot};
use crate::Result;

/// Options for [`write_model`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    select_model: Option<String>,
    dir: Option<PathBuf>,
    export: bool,
    quiet: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            select_model: None,
            dir: None,
            export: true,
            quiet: false,
        }
    }
}

impl WriteOptions {
    /// Export to disk, announce the write, pick the directory from the result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Solution to export.
    #[must_use]
    pub fn select_model(mut self, model_id: impl Into<String>) -> Self {
        self.select_model = Some(model_id.into());
        self
    }

    /// Target directory, overriding the result's output directory.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Whether to persist the artifact. When `false` nothing touches the disk.
    #[must_use]
    pub const fn export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    /// Suppress the confirmation event.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Snapshot a configuration (and optionally a fitted result) and write it.
///
/// The directory defaults to the result's output directory, then to the
/// current working directory.
///
/// # Errors
///
/// Returns snapshot errors (`UnknownModelId`, `ModelNotSelected`) or I/O
/// and serialization errors from the write.
pub fn write_model(
    input: &InputCollect,
    output: Option<&OutputCollect>,
    options: &WriteOptions,
) -> Result<Artifact> {
    let snapshot = snapshot::snapshot(input, output, options.select_model.as_deref())?;
    let dir = match (&options.dir, output.and_then(OutputCollect::output_dir)) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) => PathBuf::from(dir),
        (None, None) => std::env::current_dir()?,
    };
    write_snapshot(snapshot, &dir, options.export, options.quiet)
}

/// Write an already-built snapshot into `dir`.
///
/// Creates `dir` (with parents) when exporting. With `export == false`
/// no I/O happens, but the returned artifact still carries the path it
/// would have been written to.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn write_snapshot(snapshot: Snapshot, dir: &Path, export: bool, quiet: bool) -> Result<Artifact> {
    let json_file = model_file_path(dir, snapshot.selector());

    if export {
        fs::create_dir_all(dir)?;
        let json = snapshot.to_json_pretty()?;
        fs::write(&json_file, json)?;
        if !quiet {
            info!(
                ">> Exported model {} as {}",
                snapshot.selector(),
                json_file.display()
            );
        }
    }

    Ok(Artifact::new(snapshot, json_file, Origin::Written { exported: export }))
}

/// `RobynModel-<selector>.json`
#[must_use]
pub fn model_file_name(selector: &str) -> String {
    format!("{MODEL_FILE_PREFIX}{selector}.{MODEL_FILE_EXTENSION}")
}

/// Canonical artifact path inside `dir`, with doubled separators collapsed.
#[must_use]
pub fn model_file_path(dir: &Path, selector: &str) -> PathBuf {
    // Collecting components normalizes `a//b/` to `a/b`
    let dir: PathBuf = dir.components().collect();
    dir.join(model_file_name(selector))
}
