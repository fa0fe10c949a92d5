//! Telemetry event construction and delivery.

use crate::drift::model::DriftRecord;
use crate::errors::{ExError, ExErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Default `event_type` for drift audit events.
pub const DEFAULT_EVENT_TYPE: &str = "f5_config_drift";

/// Monitoring event describing the outcome of one audit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TelemetryEvent<'a> {
    pub event_type: String,
    pub device_id: String,
    pub drift_detected: bool,
    pub drift_count: usize,
    pub drifts: &'a [DriftRecord],
    /// Emission time, serialized as RFC 3339 in UTC
    pub timestamp_utc: DateTime<Utc>,
}

/// Build a telemetry event stamped with `timestamp`.
pub fn build_event<'a>(
    event_type: &str,
    device_id: &str,
    drifts: &'a [DriftRecord],
    timestamp: DateTime<Utc>,
) -> TelemetryEvent<'a> {
    TelemetryEvent {
        event_type: event_type.to_string(),
        device_id: device_id.to_string(),
        drift_detected: !drifts.is_empty(),
        drift_count: drifts.len(),
        drifts,
        timestamp_utc: timestamp,
    }
}

/// Build a telemetry event stamped with the current time.
pub fn build_event_now<'a>(
    event_type: &str,
    device_id: &str,
    drifts: &'a [DriftRecord],
) -> TelemetryEvent<'a> {
    build_event(event_type, device_id, drifts, Utc::now())
}

/// Forward a telemetry event to a monitoring sink.
#[allow(clippy::result_large_err)]
pub trait TelemetrySink: Send + Sync {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the event cannot be encoded, or
    /// `Io`/`ExternalService` if the sink rejects it.
    fn emit(&self, event: &TelemetryEvent<'_>) -> Result<(), ExError>;
}

/// Sink that writes the event to the log as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetrySink;

impl TelemetrySink for LogTelemetrySink {
    fn emit(&self, event: &TelemetryEvent<'_>) -> Result<(), ExError> {
        let payload = serde_json::to_string_pretty(event).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("emit_telemetry")
                .with_message(e.to_string())
        })?;
        tracing::info!(
            device_id = %event.device_id,
            drift_count = event.drift_count,
            "telemetry payload: {}",
            payload
        );
        Ok(())
    }
}

/// Sink that appends one compact JSON line per event to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesTelemetrySink {
    path: PathBuf,
}

impl JsonLinesTelemetrySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TelemetrySink for JsonLinesTelemetrySink {
    fn emit(&self, event: &TelemetryEvent<'_>) -> Result<(), ExError> {
        let io_error = |e: std::io::Error| {
            ExError::new(ExErrorKind::Io)
                .with_op("emit_telemetry")
                .with_source_name(self.path.display().to_string())
                .with_message(e.to_string())
        };

        let mut line = serde_json::to_vec(event).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("emit_telemetry")
                .with_message(e.to_string())
        })?;
        line.push(b'\n');

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        file.write_all(&line).map_err(io_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_event_fields_for_clean_run() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let event = build_event(DEFAULT_EVENT_TYPE, "f5-bigip-a1", &[], ts);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "event_type": "f5_config_drift",
                "device_id": "f5-bigip-a1",
                "drift_detected": false,
                "drift_count": 0,
                "drifts": [],
                "timestamp_utc": "2026-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_event_counts_drifts() {
        let drifts = vec![DriftRecord::unexpected(
            "root.legacy_rule",
            Node::from(json!("drop")),
        )];
        let event = build_event_now("custom_audit", "dev-1", &drifts);
        assert!(event.drift_detected);
        assert_eq!(event.drift_count, 1);
        assert_eq!(event.event_type, "custom_audit");
        assert_eq!(event.drifts, drifts.as_slice());
    }

    #[test]
    fn test_log_sink_accepts_event() {
        let event = build_event_now(DEFAULT_EVENT_TYPE, "dev-1", &[]);
        assert!(LogTelemetrySink.emit(&event).is_ok());
    }
}
