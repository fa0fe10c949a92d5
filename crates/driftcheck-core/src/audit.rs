//! Audit orchestration: load, compare, fan out.
//!
//! The drift list is computed once and handed by shared reference to the
//! reporter, the telemetry sink and the ticketing client. Delivery failures
//! are collected in the outcome and never abort the run.

use crate::change_request::{build_change_request, ChangeRequestTemplate, TicketingClient};
use crate::drift::model::{DriftRecord, DriftSummary};
use crate::drift::{compare_states, DriftRenderer};
use crate::errors::{DriftCheckError, ExError, Result};
use crate::loader::StateSource;
use crate::schema::{
    OP_AUDIT, OP_COMPARE, OP_EMIT_TELEMETRY, OP_LOAD_DOCUMENT, OP_OPEN_CHANGE_REQUEST,
};
use crate::telemetry::{build_event_now, TelemetrySink, DEFAULT_EVENT_TYPE};
use crate::tree::Node;
use crate::{log_op_end, log_op_error, log_op_start};
use driftcheck_core_types::{RunContext, RunId};
use std::time::Instant;

/// Parameters of one audit run.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub device_id: String,
    /// Prefix for every drift path
    pub root_label: String,
    pub event_type: String,
    pub ticket_template: ChangeRequestTemplate,
}

impl AuditRequest {
    pub fn new(device_id: impl Into<String>, root_label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            root_label: root_label.into(),
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            ticket_template: ChangeRequestTemplate::default(),
        }
    }
}

/// Downstream consumers of the drift list.
pub struct AuditConsumers<'a> {
    pub renderer: &'a dyn DriftRenderer,
    pub telemetry: &'a dyn TelemetrySink,
    /// `None` skips change-request creation entirely
    pub ticketing: Option<&'a dyn TicketingClient>,
}

/// Result of one audit run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub run_id: RunId,
    pub drifts: Vec<DriftRecord>,
    pub summary: DriftSummary,
    /// Rendered report
    pub report: String,
    /// True when a change request was built and accepted
    pub change_request_opened: bool,
    pub ticket_ref: Option<String>,
    /// Telemetry/ticketing failures; the drift list is unaffected by them
    pub delivery_failures: Vec<ExError>,
}

impl AuditOutcome {
    pub fn drift_detected(&self) -> bool {
        !self.drifts.is_empty()
    }
}

/// Run one audit.
///
/// # Errors
///
/// Returns the load error of the first source that fails. Comparison and
/// delivery never fail the run.
pub fn run_audit(
    request: &AuditRequest,
    desired: &dyn StateSource,
    actual: &dyn StateSource,
    consumers: &AuditConsumers<'_>,
) -> Result<AuditOutcome> {
    let ctx = RunContext::new(request.device_id.as_str());
    let span = tracing::info_span!(
        "audit",
        run_id = %ctx.run_id,
        device_id = %ctx.device_id
    );
    let _guard = span.enter();

    let started = Instant::now();
    log_op_start!(OP_AUDIT, device_id = %ctx.device_id, root_path = %request.root_label);

    let (desired_tree, actual_tree) = match load_both(desired, actual) {
        Ok(trees) => trees,
        Err(err) => {
            log_op_error!(
                OP_AUDIT,
                err.clone(),
                duration_ms = elapsed_ms(started),
                device_id = %ctx.device_id
            );
            return Err(err);
        }
    };

    let compare_started = Instant::now();
    log_op_start!(OP_COMPARE, root_path = %request.root_label);
    let drifts = compare_states(&desired_tree, &actual_tree, &request.root_label);
    log_op_end!(
        OP_COMPARE,
        duration_ms = elapsed_ms(compare_started),
        drift_count = drifts.len()
    );

    let summary = DriftSummary::from_records(&drifts);
    let report = consumers.renderer.render(&drifts);

    let mut delivery_failures = Vec::new();

    let event = build_event_now(&request.event_type, &request.device_id, &drifts);
    let telemetry_started = Instant::now();
    match consumers.telemetry.emit(&event) {
        Ok(()) => {
            log_op_end!(OP_EMIT_TELEMETRY, duration_ms = elapsed_ms(telemetry_started));
        }
        Err(err) => {
            log_op_error!(
                OP_EMIT_TELEMETRY,
                err.clone(),
                duration_ms = elapsed_ms(telemetry_started)
            );
            delivery_failures.push(err);
        }
    }

    let mut ticket_ref = None;
    match (
        build_change_request(&request.ticket_template, &request.device_id, &drifts),
        consumers.ticketing,
    ) {
        (None, _) => {
            tracing::info!("no drift detected; change request not required");
        }
        (Some(_), None) => {
            tracing::info!("ticketing disabled; change request not opened");
        }
        (Some(change_request), Some(client)) => {
            let ticket_started = Instant::now();
            match client.submit(&change_request) {
                Ok(reference) => {
                    log_op_end!(
                        OP_OPEN_CHANGE_REQUEST,
                        duration_ms = elapsed_ms(ticket_started),
                        ticket_ref = %reference
                    );
                    ticket_ref = Some(reference);
                }
                Err(err) => {
                    log_op_error!(
                        OP_OPEN_CHANGE_REQUEST,
                        err.clone(),
                        duration_ms = elapsed_ms(ticket_started)
                    );
                    delivery_failures.push(err);
                }
            }
        }
    }

    log_op_end!(
        OP_AUDIT,
        duration_ms = elapsed_ms(started),
        device_id = %ctx.device_id,
        drift_count = summary.total(),
        delivery_failures = delivery_failures.len()
    );

    Ok(AuditOutcome {
        run_id: ctx.run_id,
        change_request_opened: ticket_ref.is_some(),
        ticket_ref,
        drifts,
        summary,
        report,
        delivery_failures,
    })
}

fn load_both(desired: &dyn StateSource, actual: &dyn StateSource) -> Result<(Node, Node)> {
    let desired_tree = load_one("desired", desired)?;
    let actual_tree = load_one("actual", actual)?;
    Ok((desired_tree, actual_tree))
}

fn load_one(side: &str, source: &dyn StateSource) -> Result<Node> {
    let started = Instant::now();
    let description = source.describe();
    log_op_start!(OP_LOAD_DOCUMENT, side = side, source = %description);
    match source.load().and_then(|tree| require_mapping(tree, &description)) {
        Ok(tree) => {
            log_op_end!(OP_LOAD_DOCUMENT, duration_ms = elapsed_ms(started), side = side);
            Ok(tree)
        }
        Err(err) => {
            log_op_error!(
                OP_LOAD_DOCUMENT,
                err.clone(),
                duration_ms = elapsed_ms(started),
                side = side
            );
            Err(err)
        }
    }
}

/// Sources other than files are not checked by the loader.
fn require_mapping(tree: Node, description: &str) -> Result<Node> {
    if tree.is_mapping() {
        Ok(tree)
    } else {
        Err(DriftCheckError::NotAMapping {
            path: description.to_string(),
            found: tree.kind().to_string(),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
