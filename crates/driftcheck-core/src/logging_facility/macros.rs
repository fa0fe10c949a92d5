//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use driftcheck_core::log_op_start;
/// log_op_start!("audit");
/// log_op_start!("audit", device_id = "f5-bigip-a1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use driftcheck_core::log_op_end;
/// log_op_end!("audit", duration_ms = 42);
/// log_op_end!("audit", duration_ms = 42, drift_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`.
///
/// # Example
///
/// ```
/// # use driftcheck_core::log_op_error;
/// # use driftcheck_core::errors::DriftCheckError;
/// let err = DriftCheckError::SourceNotFound { path: "desired.yaml".to_string() };
/// log_op_error!("load_document", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($field)*
        );
    }};
}

#[cfg(test)]
mod tests {
    use crate::errors::DriftCheckError;
    use crate::logging_facility::test_capture::init_test_capture;
    use crate::schema::{
        EVENT_END, EVENT_END_ERROR, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
        FIELD_ERR_KIND, FIELD_EVENT, FIELD_OP,
    };

    #[test]
    fn test_emitted_field_names_match_schema() {
        let capture = init_test_capture();

        log_op_end!("macros_schema_end", duration_ms = 5);
        let err = DriftCheckError::InvalidConfig {
            reason: "bad".to_string(),
        };
        log_op_error!("macros_schema_error", err, duration_ms = 6);

        let end = &capture.events_for("macros_schema_end", EVENT_END)[0];
        assert_eq!(end.field(FIELD_OP), Some("macros_schema_end"));
        assert_eq!(end.field(FIELD_EVENT), Some(EVENT_END));
        assert_eq!(end.field(FIELD_DURATION_MS), Some("5"));
        assert!(end.field(FIELD_COMPONENT).is_some());

        let error = &capture.events_for("macros_schema_error", EVENT_END_ERROR)[0];
        assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_INVALID_CONFIG"));
        assert_eq!(error.field(FIELD_ERR_KIND), Some("InvalidConfig"));
    }
}
