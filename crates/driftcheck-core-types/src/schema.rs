//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across every audit log line.
//! `tracing` macros take field names as identifiers, so the emitting side
//! writes the same names literally; readers (the capture layer, tests, log
//! queries) look fields up through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Audit identifiers
pub const FIELD_DEVICE_ID: &str = "device_id";
pub const FIELD_ROOT_PATH: &str = "root_path";
pub const FIELD_SOURCE: &str = "source";

// Collection sizes
pub const FIELD_DRIFT_COUNT: &str = "drift_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_AUDIT: &str = "audit";
pub const OP_LOAD_DOCUMENT: &str = "load_document";
pub const OP_COMPARE: &str = "compare_states";
pub const OP_EMIT_TELEMETRY: &str = "emit_telemetry";
pub const OP_OPEN_CHANGE_REQUEST: &str = "open_change_request";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_DURATION_MS.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        let ops = [
            OP_AUDIT,
            OP_LOAD_DOCUMENT,
            OP_COMPARE,
            OP_EMIT_TELEMETRY,
            OP_OPEN_CHANGE_REQUEST,
        ];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
