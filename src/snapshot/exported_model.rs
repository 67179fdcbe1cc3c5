//! Exported Model - the selected solution's outputs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape;
use super::DepVarType;

/// Performance metric reported in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceMetric {
    /// Return on investment (revenue models)
    Roi,
    /// Cost per acquisition (every other model)
    Cpa,
}

impl PerformanceMetric {
    /// Metric implied by a dependent variable type.
    ///
    /// Revenue reports ROI; anything else, including an unknown type,
    /// reports CPA.
    #[must_use]
    pub fn for_dep_var(dep_var_type: Option<&DepVarType>) -> Self {
        if dep_var_type.is_some_and(DepVarType::is_revenue) {
            Self::Roi
        } else {
            Self::Cpa
        }
    }
}

impl fmt::Display for PerformanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Roi => "ROI",
            Self::Cpa => "CPA",
        })
    }
}

/// Per-regressor summary of the selected solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    variable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coef: Option<f64>,
    #[serde(rename = "decompPer", default, skip_serializing_if = "Option::is_none")]
    decomp_per: Option<f64>,
    #[serde(rename = "decompAgg", default, skip_serializing_if = "Option::is_none")]
    decomp_agg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    performance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mean_response: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mean_spend: Option<f64>,
}

impl SummaryRow {
    /// Create a summary row.
    ///
    /// Non-finite figures are stored as absent.
    #[must_use]
    pub fn new(
        variable: impl Into<String>,
        coef: f64,
        decomp_per: f64,
        decomp_agg: f64,
        performance: Option<f64>,
        mean_response: Option<f64>,
        mean_spend: Option<f64>,
    ) -> Self {
        Self {
            variable: variable.into(),
            coef: shape::finite(coef),
            decomp_per: shape::finite(decomp_per),
            decomp_agg: shape::finite(decomp_agg),
            performance: performance.and_then(shape::finite),
            mean_response: mean_response.and_then(shape::finite),
            mean_spend: mean_spend.and_then(shape::finite),
        }
    }

    /// Regressor name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Fitted coefficient.
    #[must_use]
    pub const fn coef(&self) -> Option<f64> {
        self.coef
    }

    /// Share of the total decomposition.
    #[must_use]
    pub const fn decomp_per(&self) -> Option<f64> {
        self.decomp_per
    }

    /// Aggregate decomposition.
    #[must_use]
    pub const fn decomp_agg(&self) -> Option<f64> {
        self.decomp_agg
    }

    /// ROI or CPA, depending on the model's dependent variable type.
    #[must_use]
    pub const fn performance(&self) -> Option<f64> {
        self.performance
    }

    /// Mean response.
    #[must_use]
    pub const fn mean_response(&self) -> Option<f64> {
        self.mean_response
    }

    /// Mean spend.
    #[must_use]
    pub const fn mean_spend(&self) -> Option<f64> {
        self.mean_spend
    }
}

/// Fit quality of the selected solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rsq_train: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nrmse: Option<f64>,
    #[serde(rename = "decomp.rssd", default, skip_serializing_if = "Option::is_none")]
    decomp_rssd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mape: Option<f64>,
}

impl ErrorMetrics {
    /// Create an error-metrics record.
    ///
    /// Non-finite figures are stored as absent.
    #[must_use]
    pub fn new(rsq_train: f64, nrmse: f64, decomp_rssd: f64, mape: Option<f64>) -> Self {
        Self {
            rsq_train: shape::finite(rsq_train),
            nrmse: shape::finite(nrmse),
            decomp_rssd: shape::finite(decomp_rssd),
            mape: mape.and_then(shape::finite),
        }
    }

    /// Train R squared.
    #[must_use]
    pub const fn rsq_train(&self) -> Option<f64> {
        self.rsq_train
    }

    /// Normalized RMSE.
    #[must_use]
    pub const fn nrmse(&self) -> Option<f64> {
        self.nrmse
    }

    /// Decomposition root-sum-square distance.
    #[must_use]
    pub const fn decomp_rssd(&self) -> Option<f64> {
        self.decomp_rssd
    }

    /// Calibration MAPE.
    #[must_use]
    pub const fn mape(&self) -> Option<f64> {
        self.mape
    }
}

/// Outputs of the selected solution.
///
/// `hyper_values` is keyed by full parameter name, so it always serializes
/// in byte-wise alphabetical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedModel {
    #[serde(deserialize_with = "required_scalar")]
    select_model: String,
    #[serde(default, deserialize_with = "shape::list")]
    summary: Vec<SummaryRow>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    errors: Option<ErrorMetrics>,
    #[serde(default, deserialize_with = "shape::scalar_map")]
    hyper_values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hyper_updated: Option<Value>,
    #[serde(default, deserialize_with = "shape::scalar", skip_serializing_if = "Option::is_none")]
    plot_folder: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

fn required_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    shape::scalar(deserializer)?.ok_or_else(|| D::Error::custom("select_model is empty"))
}

impl ExportedModel {
    /// Field names computed by the snapshot filter; metadata never overrides them.
    pub(crate) const RESERVED: [&'static str; 6] = [
        "select_model",
        "summary",
        "errors",
        "hyper_values",
        "hyper_updated",
        "plot_folder",
    ];

    pub(crate) fn new(
        select_model: String,
        summary: Vec<SummaryRow>,
        errors: Option<ErrorMetrics>,
        hyper_values: BTreeMap<String, f64>,
        hyper_updated: Option<Value>,
        plot_folder: Option<String>,
        extra: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            select_model,
            summary,
            errors,
            hyper_values,
            hyper_updated,
            plot_folder,
            extra,
        }
    }

    /// Selected solution ID.
    #[must_use]
    pub fn select_model(&self) -> &str {
        &self.select_model
    }

    /// Per-regressor summary.
    #[must_use]
    pub fn summary(&self) -> &[SummaryRow] {
        &self.summary
    }

    /// Error metrics, when the result table had a row for the solution.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorMetrics> {
        self.errors.as_ref()
    }

    /// Realized hyperparameter values, alphabetically ordered.
    #[must_use]
    pub const fn hyper_values(&self) -> &BTreeMap<String, f64> {
        &self.hyper_values
    }

    /// Hyperparameter space as configured for the run.
    #[must_use]
    pub const fn hyper_updated(&self) -> Option<&Value> {
        self.hyper_updated.as_ref()
    }

    /// Output directory recorded by the run.
    #[must_use]
    pub fn plot_folder(&self) -> Option<&str> {
        self.plot_folder.as_deref()
    }

    /// Additional scalar metadata carried from the result object.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_performance_metric_for_dep_var() {
        assert_eq!(
            PerformanceMetric::for_dep_var(Some(&DepVarType::Revenue)),
            PerformanceMetric::Roi
        );
        assert_eq!(
            PerformanceMetric::for_dep_var(Some(&DepVarType::Conversion)),
            PerformanceMetric::Cpa
        );
        assert_eq!(PerformanceMetric::for_dep_var(None), PerformanceMetric::Cpa);
        assert_eq!(PerformanceMetric::Roi.to_string(), "ROI");
    }

    #[test]
    fn test_summary_row_drops_non_finite() {
        let row = SummaryRow::new("trend", 1.0, 0.2, 100.0, Some(f64::NAN), None, None);
        assert!(row.performance().is_none());
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("performance").is_none());
    }

    #[test]
    fn test_non_finite_figures_round_trip_as_absent() {
        let row = SummaryRow::new("tv_S", f64::NAN, f64::INFINITY, 10.0, Some(1.2), None, None);
        let errors = ErrorMetrics::new(0.9, f64::NAN, 0.1, None);
        assert!(row.coef().is_none());
        assert!(row.decomp_per().is_none());
        assert!(errors.nrmse().is_none());

        let text = serde_json::to_string(&row).unwrap();
        assert!(!text.contains("null"));
        let restored: SummaryRow = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, row);

        let restored: ErrorMetrics = serde_json::from_str(&serde_json::to_string(&errors).unwrap()).unwrap();
        assert_eq!(restored, errors);
    }

    #[test]
    fn test_errors_accept_boxed_record() {
        let model: ExportedModel = serde_json::from_value(json!({
            "select_model": ["1_2_3"],
            "errors": [{"rsq_train": 0.9, "nrmse": 0.1, "decomp.rssd": 0.2, "mape": 0.0}]
        }))
        .unwrap();
        assert_eq!(model.select_model(), "1_2_3");
        assert_eq!(model.errors().and_then(ErrorMetrics::nrmse), Some(0.1));
    }

    #[test]
    fn test_errors_empty_list_is_none() {
        let model: ExportedModel =
            serde_json::from_value(json!({"select_model": "1_2_3", "errors": []})).unwrap();
        assert!(model.errors().is_none());
    }

    #[test]
    fn test_select_model_required() {
        let result = serde_json::from_value::<ExportedModel>(json!({"summary": []}));
        assert!(result.is_err());
    }
}
