//! Chain walker - reassembles a refresh chain from its latest artifact

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::resolver::{base_dir, SessionPathResolver, SessionPrefix};
use super::{Chain, ChainLink, ChainOutcome};
use crate::artifact::{model_file_path, read_model, Artifact};
use crate::snapshot::RestoreStep;
use crate::{Error, Result};

/// Walks refresh chains using a [`SessionPathResolver`].
#[derive(Debug, Clone, Default)]
pub struct ChainWalker<R = SessionPrefix> {
    resolver: R,
}

impl ChainWalker {
    /// Walker using the default `Robyn_` session prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SessionPathResolver> ChainWalker<R> {
    /// Walker using a custom session resolver.
    #[must_use]
    pub const fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Load every model in the refresh chain ending at `json_file`.
    ///
    /// Ancestors are located by directory convention only: one per
    /// enclosing session folder, so the walk always terminates.
    ///
    /// # Errors
    ///
    /// Any unreadable ancestor aborts the walk with the reader's error.
    /// Returns `MissingSection` if the latest artifact lacks an output
    /// directory or a descendant lacks `refreshSourceID`, `UnanchoredChain`
    /// if the sessions have no usable base directory, `DuplicateLink` if a
    /// model ID repeats, and `BrokenLineage` if an ancestor file holds a
    /// different model than expected.
    pub fn walk(&self, json_file: impl AsRef<Path>) -> Result<ChainOutcome> {
        let json_file = json_file.as_ref();
        let latest = read_model(json_file, RestoreStep::Full, true)?;
        let ids = latest.snapshot().lineage();

        let output_dir = latest
            .exported_model()
            .and_then(|model| model.plot_folder())
            .map(PathBuf::from)
            .ok_or_else(|| Error::MissingSection {
                section: "ExportedModel.plot_folder".to_string(),
                path: json_file.to_path_buf(),
            })?;

        let segments = self.resolver.session_segments(&output_dir);
        let anchor = segments
            .first()
            .ok_or_else(|| Error::UnanchoredChain(output_dir.clone()))?;
        let base = base_dir(&output_dir, anchor)?;

        // Phase 1: descendant to ancestor, one link per enclosing session
        let mut reversed = vec![ChainLink::new(latest)];
        for depth in (1..segments.len()).rev() {
            let descendant = &reversed[reversed.len() - 1];
            let source_id = descendant
                .artifact()
                .input_spec()
                .refresh_source_id()
                .ok_or_else(|| Error::MissingSection {
                    section: "InputCollect.refreshSourceID".to_string(),
                    path: descendant.json_file().to_path_buf(),
                })?;

            let session_dir: PathBuf = std::iter::once(base.as_path())
                .chain(segments[..depth].iter().map(Path::new))
                .collect();
            let ancestor_file = model_file_path(&session_dir, source_id);
            debug!(ancestor = %ancestor_file.display(), "loading refresh ancestor");

            let ancestor = read_model(&ancestor_file, RestoreStep::Full, true)?;
            reversed.push(ChainLink::new(ancestor));
        }

        // Phase 2: materialize chronological order once
        reversed.reverse();
        let links = reversed;
        verify_lineage(&links)?;

        let chain = Chain::new(links, ids);
        let (expected, found) = (chain.ids().len(), chain.len());
        if expected == found {
            Ok(ChainOutcome::Complete(chain))
        } else {
            warn!(
                expected,
                found,
                "Can't replicate chain-like results if you don't follow the session folder structure"
            );
            Ok(ChainOutcome::Partial {
                chain,
                expected,
                found,
            })
        }
    }
}

/// Links must have distinct IDs, and every link after the first must name
/// its predecessor as refresh source.
fn verify_lineage(links: &[ChainLink]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for link in links {
        if !seen.insert(link.model_id()) {
            return Err(Error::DuplicateLink {
                model_id: link.model_id().to_string(),
                path: link.json_file().to_path_buf(),
            });
        }
    }

    for pair in links.windows(2) {
        let (ancestor, descendant) = (&pair[0], &pair[1]);
        let expected = descendant
            .artifact()
            .input_spec()
            .refresh_source_id()
            .unwrap_or_default();
        if expected != ancestor.model_id() {
            return Err(Error::BrokenLineage {
                expected: expected.to_string(),
                found: ancestor.model_id().to_string(),
                path: ancestor.json_file().to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Walk a refresh chain with the default session resolver.
///
/// # Errors
///
/// See [`ChainWalker::walk`].
pub fn walk_chain(json_file: impl AsRef<Path>) -> Result<ChainOutcome> {
    ChainWalker::new().walk(json_file)
}

impl ChainLink {
    fn new(artifact: Artifact) -> Self {
        let model_id = artifact.selector().to_string();
        Self { model_id, artifact }
    }
}
