//! Loading desired/actual documents from disk.

use driftcheck_core::drift::compare_states;
use driftcheck_core::errors::{DriftCheckError, ExError, ExErrorKind};
use driftcheck_core::loader::{load_document, DocumentFormat, FileSource, StateSource};
use driftcheck_core::tree::Node;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_yaml_gold_standard_loads_as_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "gold_standard.yaml",
        "pool:\n  members: 2\n  lb_method: round-robin\nvip:\n  enabled: true\nirule:\n  - log\n  - forward\n",
    );

    let tree = load_document(&path, DocumentFormat::Yaml).unwrap();
    assert_eq!(
        tree,
        Node::from(json!({
            "pool": {"members": 2, "lb_method": "round-robin"},
            "vip": {"enabled": true},
            "irule": ["log", "forward"]
        }))
    );
}

#[test]
fn test_json_actual_state_loads_through_file_source() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "f5_actual_state.json",
        r#"{"pool": {"members": 3}, "legacy_rule": "drop"}"#,
    );

    let source = FileSource::new(&path);
    assert_eq!(source.format(), DocumentFormat::Json);
    assert!(source.describe().contains("f5_actual_state.json"));
    let tree = source.load().unwrap();
    assert_eq!(
        tree,
        Node::from(json!({"pool": {"members": 3}, "legacy_rule": "drop"}))
    );
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = FileSource::new(&path).load().unwrap_err();
    assert!(matches!(err, DriftCheckError::SourceNotFound { .. }));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::NotFound);
    assert_eq!(ex.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_top_level_sequence_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "list.json", "[1, 2, 3]");
    let err = load_document(&path, DocumentFormat::Json).unwrap_err();
    match err {
        DriftCheckError::NotAMapping { found, .. } => assert_eq!(found, "sequence"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_yaml_document_is_not_a_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.yaml", "");
    let err = load_document(&path, DocumentFormat::Yaml).unwrap_err();
    assert!(matches!(err, DriftCheckError::NotAMapping { .. }));
}

#[test]
fn test_malformed_yaml_is_parse_failure() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.yaml", "pool: [unclosed\n");
    let err = load_document(&path, DocumentFormat::Yaml).unwrap_err();
    match err {
        DriftCheckError::ParseFailure { format, .. } => assert_eq!(format, "YAML"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "state.txt", r#"{"a": {"b": 1}}"#);
    let source = FileSource::with_format(&path, DocumentFormat::Json);
    assert_eq!(source.path(), path.as_path());
    assert_eq!(source.load().unwrap(), Node::from(json!({"a": {"b": 1}})));
}

#[test]
fn test_anchor_and_merge_key_match_expanded_json() {
    let dir = TempDir::new().unwrap();
    let desired = write(
        &dir,
        "gold_standard.yaml",
        "defaults: &d\n  timeout: 5\npool:\n  <<: *d\n  members: 2\n",
    );
    let actual = write(
        &dir,
        "f5_actual_state.json",
        r#"{"defaults": {"timeout": 5}, "pool": {"timeout": 5, "members": 2}}"#,
    );

    let desired = FileSource::new(&desired).load().unwrap();
    let actual = FileSource::new(&actual).load().unwrap();
    assert!(compare_states(&desired, &actual, "root").is_empty());
}

#[test]
fn test_yaml_yes_stays_a_string() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "gold.yaml", "vip:\n  enabled: yes\n");
    let tree = load_document(&path, DocumentFormat::Yaml).unwrap();
    assert_eq!(tree, Node::from(json!({"vip": {"enabled": "yes"}})));
}
