//! Error types for robyn-artifact
//!
//! Every fatal condition names the offending path or model ID so the caller
//! can act on it without re-deriving context.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// robyn-artifact error types
#[derive(Error, Debug)]
pub enum Error {
    /// Selected model is not part of the result's solution set
    #[error("Unknown model ID '{model_id}'\nKnown solutions: {}", known.join(", "))]
    UnknownModelId {
        /// The requested model ID
        model_id: String,
        /// Solution IDs the result object knows about
        known: Vec<String>,
    },

    /// Result holds several solutions and none was selected
    #[error("No model selected among {candidates} solutions\nPass select_model to choose one")]
    ModelNotSelected {
        /// Number of candidate solutions
        candidates: usize,
    },

    /// Artifact path does not carry a `.json` extension
    #[error("JSON file must be a valid .json file: {}", .0.display())]
    InvalidExtension(PathBuf),

    /// Artifact path does not exist
    #[error("JSON file can't be imported: {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// Required section or field is absent from the artifact
    #[error("JSON file must contain {section}: {}", path.display())]
    MissingSection {
        /// Section or field name (e.g. `InputCollect`, `ExportedModel`)
        section: String,
        /// File the section was expected in
        path: PathBuf,
    },

    /// The session anchor resolves to an empty or root base directory
    #[error("Can't locate refresh sessions: output directory {} has no usable base directory", .0.display())]
    UnanchoredChain(PathBuf),

    /// A loaded ancestor is not the model its descendant points at
    #[error("Broken refresh chain at {}: expected model '{expected}', found '{found}'", path.display())]
    BrokenLineage {
        /// Model ID the descendant references
        expected: String,
        /// Model ID stored in the loaded file
        found: String,
        /// File that was loaded
        path: PathBuf,
    },

    /// Two links of one chain carry the same model ID
    #[error("Duplicate model '{model_id}' in refresh chain at {}\nEach refresh must select a distinct model ID", path.display())]
    DuplicateLink {
        /// Repeated model ID
        model_id: String,
        /// File holding the later occurrence
        path: PathBuf,
    },

    /// Loaded chain length disagrees with the declared lineage
    #[error("Chain length mismatch: lineage declares {expected} models, loaded {found}\nCan't replicate chain-like results without the standard session folder structure")]
    ChainLengthMismatch {
        /// Length of the canonical ID list
        expected: usize,
        /// Number of links actually loaded
        found: usize,
    },

    /// Artifact content is not valid JSON or does not match the schema
    #[error("Invalid artifact {}: {source}", path.display())]
    InvalidJson {
        /// File being parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by an external collaborator, passed through unmodified
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl Error {
    /// Whether the caller may keep using a best-effort result despite this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ChainLengthMismatch { .. })
    }
}
