//! Canonical artifact schema and the filter that produces it
//!
//! ## Schema Overview
//!
//! ```text
//! Snapshot
//!   ├── InputCollect  (InputSpec)       always present
//!   └── ExportedModel (ExportedModel)   present when a solution was exported
//!         ├── summary      [SummaryRow]
//!         ├── errors       ErrorMetrics
//!         └── hyper_values {name -> value}, alphabetical
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use robyn_artifact::session::InputCollect;
//! use robyn_artifact::snapshot::{self, INPUTS_SELECTOR};
//!
//! let input = InputCollect::new()
//!     .with("dep_var", "revenue")
//!     .with("dep_var_type", "revenue");
//!
//! let snapshot = snapshot::snapshot(&input, None, None).unwrap();
//! assert_eq!(snapshot.selector(), INPUTS_SELECTOR);
//! ```

mod exported_model;
pub mod filter;
mod input_spec;
pub(crate) mod shape;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use exported_model::{ErrorMetrics, ExportedModel, PerformanceMetric, SummaryRow};
pub use filter::{snapshot, HYPERPARAMETER_SUFFIXES, REGULARIZATION_PARAM, RETAINED_STRUCTURES};
pub use input_spec::{Adstock, DepVarType, InputSpec};

use crate::{Error, Result};

/// Selector label of a configuration-only snapshot.
pub const INPUTS_SELECTOR: &str = "inputs";

/// Top-level key of the configuration section.
pub const INPUT_SECTION: &str = "InputCollect";

/// Top-level key of the selected-model section.
pub const MODEL_SECTION: &str = "ExportedModel";

/// Top-level key of the run bookkeeping section some exporters add.
pub const MODELS_COLLECT_SECTION: &str = "ModelsCollect";

/// How much of an artifact the caller intends to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStep {
    /// Configuration only; `ExportedModel` is optional.
    Inputs,
    /// Configuration and selected model; both sections are required.
    Full,
}

impl TryFrom<u8> for RestoreStep {
    type Error = u8;

    fn try_from(step: u8) -> std::result::Result<Self, u8> {
        match step {
            1 => Ok(Self::Inputs),
            2 => Ok(Self::Full),
            other => Err(other),
        }
    }
}

/// Canonical exportable shape: configuration plus optional selected model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "InputCollect")]
    input_collect: InputSpec,
    #[serde(rename = "ExportedModel", default, skip_serializing_if = "Option::is_none")]
    exported_model: Option<ExportedModel>,
}

impl Snapshot {
    /// Assemble a snapshot from its sections.
    #[must_use]
    pub const fn new(input_collect: InputSpec, exported_model: Option<ExportedModel>) -> Self {
        Self {
            input_collect,
            exported_model,
        }
    }

    /// Configuration section.
    #[must_use]
    pub const fn input_collect(&self) -> &InputSpec {
        &self.input_collect
    }

    /// Selected-model section, if exported.
    #[must_use]
    pub const fn exported_model(&self) -> Option<&ExportedModel> {
        self.exported_model.as_ref()
    }

    /// Selected model ID, or `inputs` for a configuration-only snapshot.
    #[must_use]
    pub fn selector(&self) -> &str {
        self.exported_model
            .as_ref()
            .map_or(INPUTS_SELECTOR, ExportedModel::select_model)
    }

    /// Performance metric the summary table reports.
    #[must_use]
    pub fn performance_metric(&self) -> PerformanceMetric {
        PerformanceMetric::for_dep_var(self.input_collect.dep_var_type())
    }

    /// Canonical lineage: stored refresh chain plus this model's own ID.
    #[must_use]
    pub fn lineage(&self) -> Vec<String> {
        let mut ids = self.input_collect.refresh_chain().to_vec();
        if let Some(model) = &self.exported_model {
            ids.push(model.select_model().to_string());
        }
        ids
    }

    /// Pretty-printed JSON with deterministic key order.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot from an in-memory JSON document.
    ///
    /// Applies the same validation as reading a file; `origin` is only
    /// used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` or `MissingSection`.
    pub fn from_json_str(json: &str, step: RestoreStep, origin: &Path) -> Result<Self> {
        let document: Value = serde_json::from_str(json).map_err(|source| Error::InvalidJson {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_document(document, step, origin)
    }

    /// Validate and type a parsed document.
    pub(crate) fn from_document(document: Value, step: RestoreStep, origin: &Path) -> Result<Self> {
        let missing = |section: &str| Error::MissingSection {
            section: section.to_string(),
            path: origin.to_path_buf(),
        };
        let invalid = |source: serde_json::Error| Error::InvalidJson {
            path: origin.to_path_buf(),
            source,
        };

        let Value::Object(mut sections) = document else {
            return Err(missing(INPUT_SECTION));
        };

        let mut input = match sections.remove(INPUT_SECTION) {
            Some(Value::Object(fields)) => fields,
            _ => return Err(missing(INPUT_SECTION)),
        };
        // Files from other tooling may still carry zero-length fields
        input.retain(|_, value| !shape::is_empty(value));

        let mut model = match sections.remove(MODEL_SECTION) {
            Some(Value::Object(fields)) => Some(fields),
            _ => None,
        };
        if let (Some(model), Some(Value::Object(collect))) =
            (model.as_mut(), sections.remove(MODELS_COLLECT_SECTION))
        {
            for (key, value) in collect {
                if shape::is_exportable(&value) {
                    model.entry(key).or_insert(value);
                }
            }
        }
        if step == RestoreStep::Full && model.is_none() {
            return Err(missing(MODEL_SECTION));
        }

        let input_collect = serde_json::from_value(Value::Object(input)).map_err(invalid)?;
        let exported_model = model
            .map(|fields| serde_json::from_value(Value::Object(fields)))
            .transpose()
            .map_err(invalid)?;

        Ok(Self::new(input_collect, exported_model))
    }
}
