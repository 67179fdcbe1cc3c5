//! Session path resolution - where refresh sessions live on disk
//!
//! Each refresh runs in a subdirectory of the previous session's folder:
//!
//! ```text
//! <base>/Robyn_202301_init/                      RobynModel-A.json
//! <base>/Robyn_202301_init/Robyn_202302_rf1/     RobynModel-B.json
//! <base>/Robyn_202301_init/Robyn_202302_rf1/Robyn_202303_rf2/   RobynModel-C.json
//! ```

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Prefix of session folders created by the modeling pipeline.
pub const SESSION_PREFIX: &str = "Robyn_";

/// Maps an output directory to its session folder segments.
pub trait SessionPathResolver {
    /// Session segments of `output_dir`, outermost first.
    ///
    /// The first segment anchors the chain: everything before it is the
    /// base directory shared by all sessions.
    fn session_segments(&self, output_dir: &Path) -> Vec<String>;
}

/// Resolves sessions by folder-name prefix.
///
/// Falls back to the last path component when no component carries the
/// prefix, so a single renamed session still resolves to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPrefix {
    prefix: String,
}

impl SessionPrefix {
    /// Resolver for a custom folder prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The folder prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SessionPrefix {
    fn default() -> Self {
        Self::new(SESSION_PREFIX)
    }
}

impl SessionPathResolver for SessionPrefix {
    fn session_segments(&self, output_dir: &Path) -> Vec<String> {
        let names: Vec<String> = output_dir
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let sessions: Vec<String> = names
            .iter()
            .filter(|name| name.starts_with(&self.prefix))
            .cloned()
            .collect();

        if sessions.is_empty() {
            names.last().cloned().into_iter().collect()
        } else {
            sessions
        }
    }
}

/// Directory that holds the anchoring session folder.
///
/// # Errors
///
/// Returns `UnanchoredChain` if `anchor` is not a component of
/// `output_dir`, or if the base would be empty or only a filesystem root.
pub fn base_dir(output_dir: &Path, anchor: &str) -> Result<PathBuf> {
    let components: Vec<Component<'_>> = output_dir.components().collect();
    let position = components
        .iter()
        .position(|component| matches!(component, Component::Normal(name) if *name == anchor))
        .ok_or_else(|| Error::UnanchoredChain(output_dir.to_path_buf()))?;

    // `.` and `..` are usable bases; nothing or a bare root is not
    let base = &components[..position];
    let is_root_only = base
        .iter()
        .all(|component| matches!(component, Component::RootDir | Component::Prefix(_)));
    if is_root_only {
        Err(Error::UnanchoredChain(output_dir.to_path_buf()))
    } else {
        Ok(base.iter().collect())
    }
}
