//! Model artifacts: snapshots tagged with where they live on disk
//!
//! An [`Artifact`] is what the writer returns and what the reader produces.
//! Both carry the canonical file path; the [`Origin`] records whether the
//! snapshot was freshly written (possibly without touching the disk) or
//! loaded from a file.
//!
//! ```rust,no_run
//! use robyn_artifact::artifact::{read_model, write_model, WriteOptions};
//! use robyn_artifact::session::InputCollect;
//! use robyn_artifact::snapshot::RestoreStep;
//!
//! # fn main() -> robyn_artifact::Result<()> {
//! let input = InputCollect::new().with("dep_var", "revenue");
//! let written = write_model(&input, None, &WriteOptions::new().dir("/tmp/mmm"))?;
//!
//! let restored = read_model(written.json_file(), RestoreStep::Inputs, true)?;
//! assert_eq!(restored.selector(), "inputs");
//! # Ok(())
//! # }
//! ```

mod reader;
mod writer;

use std::path::{Path, PathBuf};

pub use reader::read_model;
pub use writer::{model_file_name, model_file_path, write_model, write_snapshot, WriteOptions};

use crate::snapshot::{ExportedModel, InputSpec, PerformanceMetric, Snapshot};

/// File name prefix of every model artifact.
pub const MODEL_FILE_PREFIX: &str = "RobynModel-";

/// Extension of every model artifact.
pub const MODEL_FILE_EXTENSION: &str = "json";

/// How an artifact came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Produced by the writer; `exported` tells whether it reached the disk.
    Written {
        /// Whether the snapshot was persisted
        exported: bool,
    },
    /// Loaded from disk by the reader.
    Read,
}

/// A snapshot tagged with its canonical file path and provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    snapshot: Snapshot,
    json_file: PathBuf,
    origin: Origin,
}

impl Artifact {
    pub(crate) const fn new(snapshot: Snapshot, json_file: PathBuf, origin: Origin) -> Self {
        Self {
            snapshot,
            json_file,
            origin,
        }
    }

    /// Canonical file path (written to, or read from).
    #[must_use]
    pub fn json_file(&self) -> &Path {
        &self.json_file
    }

    /// Provenance of this artifact.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Whether this artifact was loaded from disk.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self.origin, Origin::Read)
    }

    /// Underlying snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Consume the artifact, keeping the snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Configuration section.
    #[must_use]
    pub const fn input_spec(&self) -> &InputSpec {
        self.snapshot.input_collect()
    }

    /// Selected-model section, if present.
    #[must_use]
    pub const fn exported_model(&self) -> Option<&ExportedModel> {
        self.snapshot.exported_model()
    }

    /// Selected model ID, or `inputs` for a configuration-only artifact.
    #[must_use]
    pub fn selector(&self) -> &str {
        self.snapshot.selector()
    }

    /// ROI or CPA, derived from the dependent variable type.
    #[must_use]
    pub fn performance_metric(&self) -> PerformanceMetric {
        self.snapshot.performance_metric()
    }
}
