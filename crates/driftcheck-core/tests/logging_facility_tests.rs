#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{InMemorySource, RecordingTelemetrySink, UnreachableSource};
use driftcheck_core::drift::TableRenderer;
use driftcheck_core::errors::DriftCheckError;
use driftcheck_core::logging_facility::test_capture::init_test_capture;
use driftcheck_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DEVICE_ID, FIELD_DRIFT_COUNT,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ROOT_PATH, FIELD_SOURCE, OP_AUDIT, OP_COMPARE,
    OP_LOAD_DOCUMENT,
};
use driftcheck_core::{log_op_end, log_op_error, log_op_start};
use driftcheck_core::{run_audit, AuditConsumers, AuditRequest};
use serde_json::json;

#[test]
fn test_log_op_start_emits_event() {
    let capture = init_test_capture();

    log_op_start!("logging_test_start_only");

    capture.assert_event_exists("logging_test_start_only", EVENT_START);
}

#[test]
fn test_log_op_end_carries_duration() {
    let capture = init_test_capture();

    log_op_start!("logging_test_end");
    log_op_end!("logging_test_end", duration_ms = 42, drift_count = 3);

    let ends = capture.events_for("logging_test_end", EVENT_END);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(ends[0].field(FIELD_DRIFT_COUNT), Some("3"));
}

#[test]
fn test_log_op_error_records_code() {
    let capture = init_test_capture();

    let err = DriftCheckError::SourceNotFound {
        path: "gold_standard.yaml".to_string(),
    };
    log_op_error!("logging_test_error", err, duration_ms = 7);

    let errors = capture.events_for("logging_test_error", EVENT_END_ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, tracing::Level::ERROR);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert!(errors[0]
        .field("error")
        .unwrap()
        .contains("gold_standard.yaml"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_panics_when_missing() {
    let capture = init_test_capture();
    capture.assert_event_exists("logging_test_never_logged", EVENT_START);
}

#[test]
fn test_audit_logs_start_and_end_for_each_op() {
    let capture = init_test_capture();
    let renderer = TableRenderer::default();
    let telemetry = RecordingTelemetrySink::default();
    let consumers = AuditConsumers {
        renderer: &renderer,
        telemetry: &telemetry,
        ticketing: None,
    };
    let desired = InMemorySource::new("logging-audit-desired", json!({"a": 1}));
    let actual = InMemorySource::new("logging-audit-actual", json!({"a": 2}));

    run_audit(
        &AuditRequest::new("logging-audit-device", "logging_audit_root"),
        &desired,
        &actual,
        &consumers,
    )
    .unwrap();

    let audit_marker = |e: &driftcheck_core::logging_facility::test_capture::CapturedEvent| {
        e.field(FIELD_DEVICE_ID) == Some("logging-audit-device")
    };
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(OP_AUDIT)
            && e.event.as_deref() == Some(EVENT_START)
            && audit_marker(e)),
        1
    );
    let audit_end: Vec<_> = capture
        .events_for(OP_AUDIT, EVENT_END)
        .into_iter()
        .filter(|e| audit_marker(e))
        .collect();
    assert_eq!(audit_end.len(), 1);
    assert_eq!(audit_end[0].field(FIELD_DRIFT_COUNT), Some("1"));

    let load_starts = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_LOAD_DOCUMENT)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_SOURCE)
                .is_some_and(|s| s.starts_with("memory:logging-audit-"))
    });
    assert_eq!(load_starts, 2);

    let compare_starts = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_COMPARE)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_ROOT_PATH) == Some("logging_audit_root")
    });
    assert_eq!(compare_starts, 1);
}

#[test]
fn test_failed_load_logs_error_event() {
    let capture = init_test_capture();
    let renderer = TableRenderer::default();
    let telemetry = RecordingTelemetrySink::default();
    let consumers = AuditConsumers {
        renderer: &renderer,
        telemetry: &telemetry,
        ticketing: None,
    };
    let desired = InMemorySource::new("logging-failed-desired", json!({}));

    let result = run_audit(
        &AuditRequest::new("logging-failed-device", "root"),
        &desired,
        &UnreachableSource,
        &consumers,
    );
    assert!(result.is_err());

    let audit_errors: Vec<_> = capture
        .events_for(OP_AUDIT, EVENT_END_ERROR)
        .into_iter()
        .filter(|e| e.field(FIELD_DEVICE_ID) == Some("logging-failed-device"))
        .collect();
    assert_eq!(audit_errors.len(), 1);
    assert_eq!(audit_errors[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
}
