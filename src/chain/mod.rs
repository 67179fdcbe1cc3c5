//! Refresh chains: models linked by successive refreshes
//!
//! A chain is rebuilt from its most recent artifact by walking up the
//! session folder hierarchy. The result is explicit about completeness:
//!
//! ```text
//! walk(C) ── Ok(Complete(chain))            links == declared lineage
//!         ├─ Ok(Partial { chain, .. })      usable, but shorter or longer
//!         └─ Err(..)                        an ancestor could not be loaded
//! ```
//!
//! ```rust,no_run
//! use robyn_artifact::chain::walk_chain;
//!
//! # fn main() -> robyn_artifact::Result<()> {
//! let outcome = walk_chain("/data/mmm/Robyn_init/Robyn_rf1/RobynModel-2_4_1.json")?;
//! for link in outcome.chain().links() {
//!     println!("{} <- {}", link.model_id(), link.json_file().display());
//! }
//! # Ok(())
//! # }
//! ```

mod resolver;
mod walker;

use std::path::{Path, PathBuf};

pub use resolver::{base_dir, SessionPathResolver, SessionPrefix, SESSION_PREFIX};
pub use walker::{walk_chain, ChainWalker};

use crate::artifact::{model_file_path, Artifact};
use crate::{Error, Result};

/// One model of a refresh chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    model_id: String,
    artifact: Artifact,
}

impl ChainLink {
    /// The link's own selected model ID.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The loaded artifact.
    #[must_use]
    pub const fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// File the artifact was loaded from.
    #[must_use]
    pub fn json_file(&self) -> &Path {
        self.artifact.json_file()
    }

    /// Canonical file path derived from the link's recorded output directory.
    ///
    /// Falls back to the directory the file was loaded from.
    #[must_use]
    pub fn canonical_json_file(&self) -> PathBuf {
        let dir = self
            .artifact
            .exported_model()
            .and_then(|model| model.plot_folder())
            .map_or_else(
                || self.json_file().parent().unwrap_or(Path::new("")).to_path_buf(),
                PathBuf::from,
            );
        model_file_path(&dir, &self.model_id)
    }
}

/// Refresh chain in chronological order, earliest model first.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    links: Vec<ChainLink>,
    json_files: Vec<PathBuf>,
    ids: Vec<String>,
}

impl Chain {
    fn new(links: Vec<ChainLink>, ids: Vec<String>) -> Self {
        let json_files = links.iter().map(ChainLink::canonical_json_file).collect();
        Self {
            links,
            json_files,
            ids,
        }
    }

    /// Links, earliest first.
    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Number of loaded links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// One canonical JSON path per link, earliest first.
    #[must_use]
    pub fn json_files(&self) -> &[PathBuf] {
        &self.json_files
    }

    /// Lineage declared by the latest artifact, including its own ID.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Model IDs of the loaded links, earliest first.
    #[must_use]
    pub fn model_ids(&self) -> Vec<&str> {
        self.links.iter().map(ChainLink::model_id).collect()
    }

    /// Link for a model ID; IDs are unique within a chain.
    #[must_use]
    pub fn get(&self, model_id: &str) -> Option<&ChainLink> {
        self.links.iter().find(|link| link.model_id == model_id)
    }

    /// The most recent link.
    #[must_use]
    pub fn latest(&self) -> Option<&ChainLink> {
        self.links.last()
    }
}

/// Result of a chain walk that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainOutcome {
    /// Loaded links match the declared lineage length.
    Complete(Chain),
    /// Loaded links disagree with the declared lineage length.
    Partial {
        /// The best-effort chain
        chain: Chain,
        /// Declared lineage length
        expected: usize,
        /// Loaded link count
        found: usize,
    },
}

impl ChainOutcome {
    /// Whether the chain matches its declared lineage.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// The chain, complete or not.
    #[must_use]
    pub const fn chain(&self) -> &Chain {
        match self {
            Self::Complete(chain) | Self::Partial { chain, .. } => chain,
        }
    }

    /// Consume the outcome, keeping the chain either way.
    #[must_use]
    pub fn into_chain(self) -> Chain {
        match self {
            Self::Complete(chain) | Self::Partial { chain, .. } => chain,
        }
    }

    /// Treat a partial chain as an error.
    ///
    /// # Errors
    ///
    /// Returns `ChainLengthMismatch` for a partial chain.
    pub fn into_result(self) -> Result<Chain> {
        match self {
            Self::Complete(chain) => Ok(chain),
            Self::Partial {
                expected, found, ..
            } => Err(Error::ChainLengthMismatch { expected, found }),
        }
    }
}
