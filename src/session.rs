//! Live session objects exchanged with the modeling pipeline
//!
//! `InputCollect` and `OutputCollect` are produced by the external
//! input-construction and model-fitting collaborators. They are loosely
//! shaped on purpose: the snapshot filter decides what becomes part of an
//! artifact, so these types only carry what the pipeline hands over.

use serde_json::{Map, Value};

use crate::snapshot::{DepVarType, InputSpec};
use crate::{Error, Result};

/// Live model configuration as assembled by the input-construction step.
///
/// Holds arbitrary named fields, including data frames and other nested
/// structures that never reach an exported artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputCollect {
    fields: Map<String, Value>,
}

impl InputCollect {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing field map.
    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Add or replace a field, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Dependent variable type, accepting a bare or single-element list value.
    #[must_use]
    pub fn dep_var_type(&self) -> Option<DepVarType> {
        let value = match self.fields.get("dep_var_type")? {
            Value::Array(items) if items.len() == 1 => &items[0],
            other => other,
        };
        value.as_str().map(DepVarType::from)
    }
}

impl TryFrom<&InputSpec> for InputCollect {
    type Error = Error;

    /// Turn a restored spec back into a live configuration.
    fn try_from(spec: &InputSpec) -> Result<Self> {
        match serde_json::to_value(spec)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::Json(serde::ser::Error::custom(format!(
                "input spec serialized to {other}, not an object"
            )))),
        }
    }
}

/// One row of the per-solution decomposition table.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompRow {
    /// Solution the row belongs to
    pub sol_id: String,
    /// Regressor name
    pub variable: String,
    /// Fitted coefficient
    pub coef: f64,
    /// Share of the total decomposition
    pub decomp_perc: f64,
    /// Aggregate decomposition
    pub decomp_agg: f64,
    /// Return on investment (media rows only)
    pub roi_total: Option<f64>,
    /// Cost per acquisition (media rows only)
    pub cpa_total: Option<f64>,
    /// Mean response
    pub mean_response: Option<f64>,
    /// Mean spend
    pub mean_spend: Option<f64>,
}

impl DecompRow {
    /// Create a row for a non-media regressor.
    #[must_use]
    pub fn new(
        sol_id: impl Into<String>,
        variable: impl Into<String>,
        coef: f64,
        decomp_perc: f64,
        decomp_agg: f64,
    ) -> Self {
        Self {
            sol_id: sol_id.into(),
            variable: variable.into(),
            coef,
            decomp_perc,
            decomp_agg,
            roi_total: None,
            cpa_total: None,
            mean_response: None,
            mean_spend: None,
        }
    }

    /// Attach media performance figures.
    #[must_use]
    pub const fn with_media(
        mut self,
        roi_total: f64,
        cpa_total: f64,
        mean_response: f64,
        mean_spend: f64,
    ) -> Self {
        self.roi_total = Some(roi_total);
        self.cpa_total = Some(cpa_total);
        self.mean_response = Some(mean_response);
        self.mean_spend = Some(mean_spend);
        self
    }
}

/// One row of the per-solution hyperparameter and error table.
///
/// `params` keeps the column order of the fitting engine; the snapshot
/// filter is responsible for selecting and ordering them.
#[derive(Debug, Clone, PartialEq)]
pub struct HypParamRow {
    /// Solution the row belongs to
    pub sol_id: String,
    /// Train R squared
    pub rsq_train: f64,
    /// Normalized RMSE
    pub nrmse: f64,
    /// Decomposition root-sum-square distance
    pub decomp_rssd: f64,
    /// Calibration MAPE, when calibration was used
    pub mape: Option<f64>,
    /// Realized parameter columns (`<channel>_<suffix>`, `lambda`, bookkeeping)
    pub params: Vec<(String, f64)>,
}

impl HypParamRow {
    /// Create a row with error metrics and no parameters.
    #[must_use]
    pub fn new(sol_id: impl Into<String>, rsq_train: f64, nrmse: f64, decomp_rssd: f64) -> Self {
        Self {
            sol_id: sol_id.into(),
            rsq_train,
            nrmse,
            decomp_rssd,
            mape: None,
            params: Vec::new(),
        }
    }

    /// Set the calibration MAPE.
    #[must_use]
    pub const fn mape(mut self, mape: f64) -> Self {
        self.mape = Some(mape);
        self
    }

    /// Append a parameter column.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.push((name.into(), value));
        self
    }
}

/// Result object returned by the model-fitting collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputCollect {
    all_solutions: Vec<String>,
    x_decomp_agg: Vec<DecompRow>,
    result_hyp_param: Vec<HypParamRow>,
    plot_folder: Option<String>,
    hyper_updated: Option<Value>,
    metadata: Map<String, Value>,
}

impl OutputCollect {
    /// Create a result object with the given solution IDs.
    #[must_use]
    pub fn new<I, S>(all_solutions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all_solutions: all_solutions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a decomposition row.
    #[must_use]
    pub fn decomp_row(mut self, row: DecompRow) -> Self {
        self.x_decomp_agg.push(row);
        self
    }

    /// Append a hyperparameter/error row.
    #[must_use]
    pub fn hyp_param_row(mut self, row: HypParamRow) -> Self {
        self.result_hyp_param.push(row);
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn plot_folder(mut self, dir: impl Into<String>) -> Self {
        self.plot_folder = Some(dir.into());
        self
    }

    /// Set the hyperparameter space as it was configured for the run.
    #[must_use]
    pub fn hyper_updated(mut self, space: Value) -> Self {
        self.hyper_updated = Some(space);
        self
    }

    /// Attach an additional metadata field.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Known solution IDs.
    #[must_use]
    pub fn all_solutions(&self) -> &[String] {
        &self.all_solutions
    }

    /// Decomposition table.
    #[must_use]
    pub fn x_decomp_agg(&self) -> &[DecompRow] {
        &self.x_decomp_agg
    }

    /// Hyperparameter and error table.
    #[must_use]
    pub fn result_hyp_param(&self) -> &[HypParamRow] {
        &self.result_hyp_param
    }

    /// Output directory recorded by the run, if any.
    #[must_use]
    pub fn output_dir(&self) -> Option<&str> {
        self.plot_folder.as_deref()
    }

    /// Configured hyperparameter space, if supplied.
    #[must_use]
    pub const fn hyper_space(&self) -> Option<&Value> {
        self.hyper_updated.as_ref()
    }

    /// Additional metadata fields.
    #[must_use]
    pub const fn extra_metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}
