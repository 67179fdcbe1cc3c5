//! # robyn-artifact: Portable Model Artifacts for Marketing Mix Models
//!
//! Persists a fitted model's configuration and selected solution as a
//! self-contained JSON file, restores it, and reassembles whole refresh
//! chains from the session folders they were written to.
//!
//! ## Data Flow
//!
//! ```text
//! InputCollect + OutputCollect
//!        │  snapshot::snapshot        (filter, pure)
//!        ▼
//!     Snapshot ──► artifact::write_model ──► RobynModel-<id>.json
//!                                                   │
//!     Artifact ◄── artifact::read_model ◄───────────┘
//!        │
//!        ├──► chain::walk_chain        (ancestors via session folders)
//!        └──► recreate::recreate       (replay through the pipeline)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use robyn_artifact::artifact::{write_model, WriteOptions};
//! use robyn_artifact::chain::walk_chain;
//! use robyn_artifact::session::{InputCollect, OutputCollect};
//!
//! # fn main() -> robyn_artifact::Result<()> {
//! let input = InputCollect::new()
//!     .with("dep_var", "revenue")
//!     .with("dep_var_type", "revenue");
//! let output = OutputCollect::new(["1_12_3"]).plot_folder("/data/mmm/Robyn_202401_init/");
//!
//! let artifact = write_model(&input, Some(&output), &WriteOptions::new())?;
//! let outcome = walk_chain(artifact.json_file())?;
//! assert!(outcome.is_complete());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod artifact;
pub mod chain;
pub mod error;
pub mod recreate;
pub mod session;
pub mod snapshot;

pub use artifact::{read_model, write_model, Artifact, Origin, WriteOptions};
pub use chain::{walk_chain, Chain, ChainLink, ChainOutcome, ChainWalker};
pub use error::{Error, Result};
pub use recreate::{recreate, InputBuilder, ModelRunner, RecreateOptions};
pub use session::{InputCollect, OutputCollect};
pub use snapshot::{RestoreStep, Snapshot};
