//! Shared fixtures for robyn-artifact integration tests
//!
//! - Sample configurations and fitted results
//! - Refresh chains laid out in session folders under a temp directory

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use robyn_artifact::artifact::{write_model, WriteOptions};
use robyn_artifact::session::{DecompRow, HypParamRow, InputCollect, OutputCollect};
use serde_json::json;

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A weekly revenue model with two paid channels.
pub fn sample_input(dep_var_type: &str) -> InputCollect {
    InputCollect::new()
        .with("date_var", "DATE")
        .with("dep_var", "revenue")
        .with("dep_var_type", dep_var_type)
        .with("paid_media_vars", json!(["tv_S", "search_clicks_P"]))
        .with("paid_media_spends", json!(["tv_S", "search_S"]))
        .with("context_vars", json!(["competitor_sales_B"]))
        .with("organic_vars", json!([]))
        .with("prophet_vars", json!(["trend", "season", "holiday"]))
        .with("prophet_country", "DE")
        .with("adstock", "geometric")
        .with("window_start", "2016-01-04")
        .with("window_end", "2018-12-31")
        .with("rollingWindowStartWhich", 7)
        .with("rollingWindowEndWhich", 163)
        .with("intervalType", "week")
        .with("calibration_input", serde_json::Value::Null)
        .with(
            "hyperparameters",
            json!({
                "tv_S_alphas": [0.5, 3.0],
                "tv_S_gammas": [0.3, 1.0],
                "tv_S_thetas": [0.1, 0.4],
                "search_S_alphas": [0.5, 3.0]
            }),
        )
        .with("dt_input", json!([{"DATE": "2016-01-04", "revenue": 2_754_372.0}]))
}

/// Result with the given solutions, each with a tv and intercept row.
pub fn sample_output(solutions: &[&str], plot_folder: Option<&Path>) -> OutputCollect {
    let mut output = OutputCollect::new(solutions.iter().copied())
        .hyper_updated(json!({"tv_S_alphas": [0.5, 3.0]}))
        .metadata("cores", 8)
        .metadata("iterations", 2000)
        .metadata("allSolutions", json!(solutions))
        .metadata("clusters", json!({"n_clusters": 3}));
    if let Some(dir) = plot_folder {
        output = output.plot_folder(format!("{}/", dir.display()));
    }

    for (index, sol) in solutions.iter().enumerate() {
        let offset = f64::from(u32::try_from(index).unwrap_or(0));
        output = output
            .decomp_row(
                DecompRow::new(*sol, "tv_S", 0.5 + offset, 0.3, 120_000.0)
                    .with_media(2.5 + offset, 0.4 + offset, 80_000.0, 50_000.0),
            )
            .decomp_row(DecompRow::new(*sol, "(Intercept)", 1.0, 0.1, 40_000.0))
            .hyp_param_row(
                HypParamRow::new(*sol, 0.91, 0.08, 0.12)
                    .param("tv_S_thetas", 0.25)
                    .param("tv_S_alphas", 1.7)
                    .param("tv_S_gammas", 0.6)
                    .param("search_S_alphas", 2.2)
                    .param("lambda", 0.004)
                    .param("iterations", 2000.0),
            );
    }
    output
}

/// Paths of a written three-model refresh chain.
pub struct ChainFixture {
    pub base: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Write `A -> B -> C` into nested `Robyn_*` session folders under `root`.
pub fn write_chain(root: &Path) -> ChainFixture {
    write_chain_with(root, &["A", "B", "C"], &[])
}

/// Write a chain of `ids` into nested session folders.
///
/// `extra_lineage` is prepended to every declared `refreshChain`, to
/// simulate lineage that the folders do not reflect.
pub fn write_chain_with(root: &Path, ids: &[&str], extra_lineage: &[&str]) -> ChainFixture {
    let base = root.join("mmm");
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    let mut session_dir = base.clone();

    for (depth, id) in ids.iter().enumerate() {
        session_dir = session_dir.join(format!("Robyn_20240{}_rf{depth}", depth + 1));

        let lineage: Vec<&str> = extra_lineage
            .iter()
            .chain(ids[..depth].iter())
            .copied()
            .collect();
        let mut input = sample_input("revenue")
            .with("refreshChain", json!(lineage))
            .with("refreshCounter", depth);
        if depth > 0 {
            input = input.with("refreshSourceID", ids[depth - 1]);
        }

        let output = sample_output(&[id], Some(&session_dir));
        let artifact = write_model(&input, Some(&output), &WriteOptions::new().quiet(true))
            .expect("fixture write failed");

        dirs.push(session_dir.clone());
        files.push(artifact.json_file().to_path_buf());
    }

    ChainFixture { base, dirs, files }
}
