//! Tests for error types

use std::path::PathBuf;

use robyn_artifact::Error;

#[test]
fn test_unknown_model_id_error() {
    let error = Error::UnknownModelId {
        model_id: "9_9_9".to_string(),
        known: vec!["1_2_3".to_string(), "4_5_6".to_string()],
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Unknown model ID '9_9_9'"));
    assert!(error_str.contains("Known solutions: 1_2_3, 4_5_6"));
}

#[test]
fn test_model_not_selected_error() {
    let error = Error::ModelNotSelected { candidates: 5 };
    let error_str = format!("{error}");
    assert!(error_str.contains("among 5 solutions"));
    assert!(error_str.contains("Pass select_model"));
}

#[test]
fn test_invalid_extension_error() {
    let error = Error::InvalidExtension(PathBuf::from("/data/model.rds"));
    let error_str = format!("{error}");
    assert!(error_str.contains("valid .json file"));
    assert!(error_str.contains("/data/model.rds"));
}

#[test]
fn test_file_not_found_error() {
    let error = Error::FileNotFound(PathBuf::from("/data/RobynModel-1_2_3.json"));
    let error_str = format!("{error}");
    assert!(error_str.contains("can't be imported"));
    assert!(error_str.contains("RobynModel-1_2_3.json"));
}

#[test]
fn test_missing_section_error() {
    let error = Error::MissingSection {
        section: "ExportedModel".to_string(),
        path: PathBuf::from("/data/RobynModel-inputs.json"),
    };
    let error_str = format!("{error}");
    assert_eq!(
        error_str,
        "JSON file must contain ExportedModel: /data/RobynModel-inputs.json"
    );
}

#[test]
fn test_unanchored_chain_error() {
    let error = Error::UnanchoredChain(PathBuf::from("/Robyn_202401_init"));
    let error_str = format!("{error}");
    assert!(error_str.contains("no usable base directory"));
    assert!(error_str.contains("/Robyn_202401_init"));
}

#[test]
fn test_broken_lineage_error() {
    let error = Error::BrokenLineage {
        expected: "B".to_string(),
        found: "X".to_string(),
        path: PathBuf::from("/mmm/Robyn_1/Robyn_2/RobynModel-B.json"),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("expected model 'B', found 'X'"));
    assert!(error_str.contains("RobynModel-B.json"));
}

#[test]
fn test_duplicate_link_error() {
    let error = Error::DuplicateLink {
        model_id: "A".to_string(),
        path: PathBuf::from("/mmm/Robyn_1/Robyn_2/RobynModel-A.json"),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Duplicate model 'A'"));
    assert!(error_str.contains("Robyn_2/RobynModel-A.json"));
    assert!(!error.is_recoverable());
}

#[test]
fn test_chain_length_mismatch_error() {
    let error = Error::ChainLengthMismatch {
        expected: 4,
        found: 3,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Chain length mismatch"));
    assert!(error_str.contains("declares 4 models, loaded 3"));
    assert!(error_str.contains("session folder structure"));
}

#[test]
fn test_invalid_json_error() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = Error::InvalidJson {
        path: PathBuf::from("broken.json"),
        source,
    };
    let error_str = format!("{error}");
    assert!(error_str.starts_with("Invalid artifact broken.json: "));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("read-only"));
}

#[test]
fn test_collaborator_error_is_transparent() {
    let error: Error = anyhow::anyhow!("model fit failed").into();
    assert_eq!(format!("{error}"), "model fit failed");
}

#[test]
fn test_only_length_mismatch_is_recoverable() {
    assert!(Error::ChainLengthMismatch {
        expected: 2,
        found: 1
    }
    .is_recoverable());
    assert!(!Error::ModelNotSelected { candidates: 2 }.is_recoverable());
    assert!(!Error::FileNotFound(PathBuf::from("x.json")).is_recoverable());
}

#[test]
fn test_error_debug() {
    let error = Error::ModelNotSelected { candidates: 3 };
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("ModelNotSelected"));
}
