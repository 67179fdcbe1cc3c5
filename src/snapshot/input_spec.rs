//! Input Spec - the exportable view of a model configuration

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape;

/// Semantic type of the dependent variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepVarType {
    /// Monetary outcome; performance is reported as ROI.
    Revenue,
    /// Count outcome; performance is reported as CPA.
    Conversion,
    /// Any other label, kept verbatim.
    Other(String),
}

impl DepVarType {
    /// Whether this is the revenue type.
    #[must_use]
    pub const fn is_revenue(&self) -> bool {
        matches!(self, Self::Revenue)
    }

    /// Label as written in artifacts.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Revenue => "revenue",
            Self::Conversion => "conversion",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for DepVarType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "revenue" => Self::Revenue,
            "conversion" => Self::Conversion,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for DepVarType {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<DepVarType> for String {
    fn from(kind: DepVarType) -> Self {
        match kind {
            DepVarType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DepVarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adstock transformation family applied to media variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adstock {
    /// Fixed-rate geometric decay (`thetas`).
    Geometric,
    /// Weibull CDF decay (`shapes`, `scales`).
    WeibullCdf,
    /// Weibull PDF decay (`shapes`, `scales`).
    WeibullPdf,
}

/// Exportable view of a model's input configuration.
///
/// Empty lists and absent scalars are never serialized. The three
/// structured fields (`calibration_input`, `hyperparameters`,
/// `custom_params`) are carried verbatim. Any other exportable scalar or
/// list field lands in `extra` so the field set survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    date_var: Option<String>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    dep_var: Option<String>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    dep_var_type: Option<DepVarType>,

    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    prophet_vars: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    prophet_signs: Vec<String>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    prophet_country: Option<String>,

    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    context_vars: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    context_signs: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    paid_media_vars: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    paid_media_signs: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    paid_media_spends: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    organic_vars: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    organic_signs: Vec<String>,
    #[serde(default, deserialize_with = "shape::list", skip_serializing_if = "Vec::is_empty")]
    factor_vars: Vec<String>,

    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    adstock: Option<Adstock>,

    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    window_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    window_end: Option<NaiveDate>,
    #[serde(
        rename = "rollingWindowStartWhich",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    rolling_window_start_which: Option<u64>,
    #[serde(
        rename = "rollingWindowEndWhich",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    rolling_window_end_which: Option<u64>,
    #[serde(
        rename = "rollingWindowLength",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    rolling_window_length: Option<u64>,
    #[serde(
        rename = "intervalType",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    interval_type: Option<String>,
    #[serde(
        rename = "dayInterval",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    day_interval: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    calibration_input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hyperparameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_params: Option<Value>,

    #[serde(
        rename = "refreshChain",
        default,
        deserialize_with = "shape::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    refresh_chain: Vec<String>,
    #[serde(
        rename = "refreshSourceID",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    refresh_source_id: Option<String>,
    #[serde(
        rename = "refreshCounter",
        default,
        deserialize_with = "shape::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    refresh_counter: Option<u64>,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl InputSpec {
    /// Date column name.
    #[must_use]
    pub fn date_var(&self) -> Option<&str> {
        self.date_var.as_deref()
    }

    /// Dependent variable name.
    #[must_use]
    pub fn dep_var(&self) -> Option<&str> {
        self.dep_var.as_deref()
    }

    /// Dependent variable type.
    #[must_use]
    pub const fn dep_var_type(&self) -> Option<&DepVarType> {
        self.dep_var_type.as_ref()
    }

    /// Prophet seasonality/trend components.
    #[must_use]
    pub fn prophet_vars(&self) -> &[String] {
        &self.prophet_vars
    }

    /// Country used for holiday decomposition.
    #[must_use]
    pub fn prophet_country(&self) -> Option<&str> {
        self.prophet_country.as_deref()
    }

    /// Context variables.
    #[must_use]
    pub fn context_vars(&self) -> &[String] {
        &self.context_vars
    }

    /// Paid media exposure variables.
    #[must_use]
    pub fn paid_media_vars(&self) -> &[String] {
        &self.paid_media_vars
    }

    /// Paid media spend variables.
    #[must_use]
    pub fn paid_media_spends(&self) -> &[String] {
        &self.paid_media_spends
    }

    /// Organic media variables.
    #[must_use]
    pub fn organic_vars(&self) -> &[String] {
        &self.organic_vars
    }

    /// Adstock family.
    #[must_use]
    pub const fn adstock(&self) -> Option<Adstock> {
        self.adstock
    }

    /// First date of the modeling window.
    #[must_use]
    pub const fn window_start(&self) -> Option<NaiveDate> {
        self.window_start
    }

    /// Last date of the modeling window.
    #[must_use]
    pub const fn window_end(&self) -> Option<NaiveDate> {
        self.window_end
    }

    /// Resolved row indices of the rolling window, `(start, end)`.
    #[must_use]
    pub const fn rolling_window(&self) -> (Option<u64>, Option<u64>) {
        (self.rolling_window_start_which, self.rolling_window_end_which)
    }

    /// Data interval (`day`, `week`, `month`).
    #[must_use]
    pub fn interval_type(&self) -> Option<&str> {
        self.interval_type.as_deref()
    }

    /// Calibration input, verbatim.
    #[must_use]
    pub const fn calibration_input(&self) -> Option<&Value> {
        self.calibration_input.as_ref()
    }

    /// Hyperparameter search space, verbatim.
    #[must_use]
    pub const fn hyperparameters(&self) -> Option<&Value> {
        self.hyperparameters.as_ref()
    }

    /// Custom parameter overrides, verbatim.
    #[must_use]
    pub const fn custom_params(&self) -> Option<&Value> {
        self.custom_params.as_ref()
    }

    /// Ancestor model IDs, earliest first.
    #[must_use]
    pub fn refresh_chain(&self) -> &[String] {
        &self.refresh_chain
    }

    /// Model this configuration was refreshed from.
    #[must_use]
    pub fn refresh_source_id(&self) -> Option<&str> {
        self.refresh_source_id.as_deref()
    }

    /// Number of refreshes applied so far.
    #[must_use]
    pub const fn refresh_counter(&self) -> Option<u64> {
        self.refresh_counter
    }

    /// Exportable fields without a dedicated accessor.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Names of all fields this spec serializes, sorted.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        let mut names = match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields.keys().cloned().collect(),
            _ => Vec::new(),
        };
        names.sort();
        names
    }
}
