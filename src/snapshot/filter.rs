//! Snapshot filter - reduces live session objects to the exportable shape
//!
//! Pure transformation: no I/O, no logging.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::shape;
use super::{ErrorMetrics, ExportedModel, InputSpec, PerformanceMetric, Snapshot, SummaryRow};
use crate::session::{InputCollect, OutputCollect};
use crate::{Error, Result};

/// Structured configuration fields that are exported verbatim.
pub const RETAINED_STRUCTURES: [&str; 3] = ["calibration_input", "hyperparameters", "custom_params"];

/// Name suffixes of per-channel transformation hyperparameters.
pub const HYPERPARAMETER_SUFFIXES: [&str; 5] = ["thetas", "shapes", "scales", "alphas", "gammas"];

/// Name of the regression regularization parameter.
pub const REGULARIZATION_PARAM: &str = "lambda";

/// Build a snapshot from a configuration and, optionally, a fitted result.
///
/// # Arguments
///
/// * `input` - Live model configuration
/// * `output` - Fitted result; `None` exports the configuration only
/// * `select_model` - Solution to export; may be omitted when the result
///   holds exactly one solution
///
/// # Errors
///
/// Returns `UnknownModelId` if the selection is not a known solution,
/// `ModelNotSelected` if it is omitted with several candidates, or a JSON
/// error if a typed configuration field has the wrong shape.
pub fn snapshot(
    input: &InputCollect,
    output: Option<&OutputCollect>,
    select_model: Option<&str>,
) -> Result<Snapshot> {
    let spec = filter_inputs(input)?;
    let exported = match output {
        Some(output) => {
            let model_id = resolve_model_id(output, select_model)?;
            let metric = PerformanceMetric::for_dep_var(spec.dep_var_type());
            Some(export_model(output, model_id, metric))
        }
        None => None,
    };
    Ok(Snapshot::new(spec, exported))
}

/// Keep the exportable fields of a live configuration.
///
/// Drops null, empty, and nested fields except the retained structures,
/// which are kept verbatim (even when empty) unless null.
///
/// # Errors
///
/// Returns a JSON error if a kept field does not fit its typed slot.
pub fn filter_inputs(input: &InputCollect) -> Result<InputSpec> {
    let kept: Map<String, Value> = input
        .fields()
        .iter()
        .filter(|(key, value)| {
            if RETAINED_STRUCTURES.contains(&key.as_str()) {
                !value.is_null()
            } else {
                shape::is_exportable(value)
            }
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(serde_json::from_value(Value::Object(kept))?)
}

/// Resolve which solution to export.
///
/// # Errors
///
/// Returns `UnknownModelId` or `ModelNotSelected`.
pub fn resolve_model_id<'a>(
    output: &'a OutputCollect,
    select_model: Option<&'a str>,
) -> Result<&'a str> {
    let known = output.all_solutions();
    match select_model {
        Some(id) if known.iter().any(|sol| sol == id) => Ok(id),
        Some(id) => Err(Error::UnknownModelId {
            model_id: id.to_string(),
            known: known.to_vec(),
        }),
        None if known.len() == 1 => Ok(&known[0]),
        None => Err(Error::ModelNotSelected {
            candidates: known.len(),
        }),
    }
}

/// Whether a result column is a realized hyperparameter.
#[must_use]
pub fn is_hyperparameter(name: &str) -> bool {
    name == REGULARIZATION_PARAM
        || HYPERPARAMETER_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

/// Extract the selected solution's outputs from a result object.
///
/// `model_id` must already be validated against the solution set.
#[must_use]
pub fn export_model(output: &OutputCollect, model_id: &str, metric: PerformanceMetric) -> ExportedModel {
    let summary = output
        .x_decomp_agg()
        .iter()
        .filter(|row| row.sol_id == model_id)
        .map(|row| {
            let performance = match metric {
                PerformanceMetric::Roi => row.roi_total,
                PerformanceMetric::Cpa => row.cpa_total,
            };
            SummaryRow::new(
                row.variable.clone(),
                row.coef,
                row.decomp_perc,
                row.decomp_agg,
                performance,
                row.mean_response,
                row.mean_spend,
            )
        })
        .collect();

    let hyp_row = output
        .result_hyp_param()
        .iter()
        .find(|row| row.sol_id == model_id);

    let errors = hyp_row.map(|row| ErrorMetrics::new(row.rsq_train, row.nrmse, row.decomp_rssd, row.mape));

    // BTreeMap fixes the alphabetical key order independent of column order
    let hyper_values: BTreeMap<String, f64> = hyp_row
        .map(|row| {
            row.params
                .iter()
                .filter(|(name, value)| is_hyperparameter(name) && value.is_finite())
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let extra = output
        .extra_metadata()
        .iter()
        .filter(|(key, value)| {
            key.as_str() != "allSolutions"
                && !ExportedModel::RESERVED.contains(&key.as_str())
                && shape::is_exportable(value)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ExportedModel::new(
        model_id.to_string(),
        summary,
        errors,
        hyper_values,
        output.hyper_space().cloned(),
        output.output_dir().map(str::to_string),
        extra,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DecompRow, HypParamRow};
    use serde_json::json;

    fn two_solution_output() -> OutputCollect {
        OutputCollect::new(["1_1_1", "2_2_2"])
            .decomp_row(DecompRow::new("1_1_1", "tv_S", 0.5, 0.3, 120.0).with_media(2.5, 0.4, 80.0, 50.0))
            .decomp_row(DecompRow::new("2_2_2", "tv_S", 0.6, 0.2, 110.0).with_media(1.5, 0.7, 70.0, 45.0))
            .hyp_param_row(
                HypParamRow::new("1_1_1", 0.91, 0.08, 0.12)
                    .param("tv_S_thetas", 0.3)
                    .param("iterations", 2000.0)
                    .param("lambda", 0.01),
            )
    }

    #[test]
    fn test_filter_inputs_drops_nested_and_empty() {
        let input = InputCollect::new()
            .with("dep_var", "revenue")
            .with("dt_input", json!([{"DATE": "2020-01-06", "revenue": 1.0}]))
            .with("paid_media_vars", json!(["tv_S", "ooh_S"]))
            .with("organic_vars", json!([]))
            .with("prophet_country", Value::Null)
            .with("calibration_input", Value::Null)
            .with("hyperparameters", json!({"tv_S_alphas": [0.5, 3.0]}))
            .with("custom_params", json!([]));

        let spec = filter_inputs(&input).unwrap();
        assert_eq!(
            spec.field_names(),
            vec!["custom_params", "dep_var", "hyperparameters", "paid_media_vars"]
        );
        assert_eq!(spec.custom_params(), Some(&json!([])));
    }

    #[test]
    fn test_filter_inputs_keeps_empty_retained_structures() {
        let input = InputCollect::new()
            .with("dep_var", "revenue")
            .with("custom_params", json!([]))
            .with("calibration_input", json!({}))
            .with("hyperparameters", json!({"tv_S_alphas": []}));

        let spec = filter_inputs(&input).unwrap();
        assert_eq!(
            spec.field_names(),
            vec!["calibration_input", "custom_params", "dep_var", "hyperparameters"]
        );
        assert_eq!(spec.calibration_input(), Some(&json!({})));
        assert_eq!(spec.hyperparameters(), Some(&json!({"tv_S_alphas": []})));
    }

    #[test]
    fn test_resolve_model_id_defaults_to_single_solution() {
        let output = OutputCollect::new(["only"]);
        assert_eq!(resolve_model_id(&output, None).unwrap(), "only");
    }

    #[test]
    fn test_resolve_model_id_requires_selection() {
        let output = two_solution_output();
        assert!(matches!(
            resolve_model_id(&output, None),
            Err(Error::ModelNotSelected { candidates: 2 })
        ));
    }

    #[test]
    fn test_resolve_model_id_rejects_unknown() {
        let output = two_solution_output();
        let err = resolve_model_id(&output, Some("9_9_9")).unwrap_err();
        assert!(matches!(err, Error::UnknownModelId { ref model_id, .. } if model_id == "9_9_9"));
    }

    #[test]
    fn test_is_hyperparameter() {
        assert!(is_hyperparameter("tv_S_alphas"));
        assert!(is_hyperparameter("ooh_S_shapes"));
        assert!(is_hyperparameter("lambda"));
        assert!(!is_hyperparameter("iterations"));
        assert!(!is_hyperparameter("nrmse_test"));
    }

    #[test]
    fn test_export_model_selects_rows() {
        let output = two_solution_output().metadata("cores", 8).metadata("summary", "shadowed");
        let model = export_model(&output, "1_1_1", PerformanceMetric::Cpa);

        assert_eq!(model.summary().len(), 1);
        assert_eq!(model.summary()[0].performance(), Some(0.4));
        assert_eq!(model.errors().and_then(ErrorMetrics::rsq_train), Some(0.91));
        assert_eq!(
            model.hyper_values().keys().collect::<Vec<_>>(),
            vec!["lambda", "tv_S_thetas"]
        );
        assert_eq!(model.extra().get("cores"), Some(&json!(8)));
        assert!(model.extra().get("summary").is_none());
    }

    #[test]
    fn test_export_model_without_hyp_row() {
        let model = export_model(&two_solution_output(), "2_2_2", PerformanceMetric::Roi);
        assert!(model.errors().is_none());
        assert!(model.hyper_values().is_empty());
        assert_eq!(model.summary()[0].performance(), Some(1.5));
    }
}
