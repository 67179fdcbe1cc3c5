//! Recreation - replays a stored model through the external pipeline
//!
//! Nothing is persisted: the model runner is always invoked with
//! `export = false`.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::artifact::read_model;
use crate::session::{InputCollect, OutputCollect};
use crate::snapshot::RestoreStep;
use crate::Result;

/// Options handed through to both collaborators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecreateOptions {
    quiet: bool,
    overrides: Map<String, Value>,
}

impl RecreateOptions {
    /// Default options: announce progress, no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress progress events.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Add a pass-through option for the collaborators.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Whether progress events are suppressed.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Pass-through options.
    #[must_use]
    pub const fn overrides(&self) -> &Map<String, Value> {
        &self.overrides
    }
}

/// External input-construction step.
pub trait InputBuilder {
    /// Restore a live configuration from a stored artifact.
    ///
    /// # Errors
    ///
    /// Any failure; it is passed to the caller unmodified.
    fn restore_inputs(&self, json_file: &Path, options: &RecreateOptions) -> anyhow::Result<InputCollect>;
}

/// External model-fitting step.
pub trait ModelRunner {
    /// Refit the model described by `json_file` on `inputs`.
    ///
    /// `export` is `false` during recreation; the runner must not write
    /// artifacts when it is.
    ///
    /// # Errors
    ///
    /// Any failure; it is passed to the caller unmodified.
    fn run_model(
        &self,
        inputs: &InputCollect,
        json_file: &Path,
        export: bool,
        options: &RecreateOptions,
    ) -> anyhow::Result<OutputCollect>;
}

/// Rebuild the configuration and result of a stored model.
///
/// # Errors
///
/// Returns reader errors (the artifact must contain `ExportedModel`) or
/// `Collaborator` with the collaborator's own error.
pub fn recreate<B, M>(
    json_file: impl AsRef<Path>,
    builder: &B,
    runner: &M,
    options: &RecreateOptions,
) -> Result<(InputCollect, OutputCollect)>
where
    B: InputBuilder + ?Sized,
    M: ModelRunner + ?Sized,
{
    let json_file = json_file.as_ref();
    let artifact = read_model(json_file, RestoreStep::Full, true)?;
    if !options.is_quiet() {
        info!(">>> Recreating model {}", artifact.selector());
    }

    let inputs = builder.restore_inputs(json_file, options)?;
    let outputs = runner.run_model(&inputs, json_file, false, options)?;
    Ok((inputs, outputs))
}
