//! Change-request construction and ticketing interface.
//!
//! A change request is opened only when drift exists, so that a human
//! approves any remediation before it happens.

use crate::drift::model::DriftRecord;
use crate::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};

/// Default ticketing endpoint for change requests.
pub const DEFAULT_ENDPOINT: &str = "/api/now/table/change_request";

/// Classification constants and text used to build change requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangeRequestTemplate {
    /// Short description; `{device_id}` is replaced with the audited device
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub change_type: String,
    pub priority: String,
}

impl Default for ChangeRequestTemplate {
    fn default() -> Self {
        Self {
            short_description: "F5 config drift detected on {device_id}".to_string(),
            description: "Q-F5 Sentinel found drift; approval required before remediation."
                .to_string(),
            category: "Network".to_string(),
            change_type: "Normal".to_string(),
            priority: "2".to_string(),
        }
    }
}

/// Ticket payload submitted for human approval.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangeRequest<'a> {
    pub short_description: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub change_type: String,
    pub priority: String,
    /// Configuration item under change (the device id)
    #[serde(rename = "cmdb_ci")]
    pub configuration_item: String,
    #[serde(rename = "u_drift_details")]
    pub drift_details: &'a [DriftRecord],
}

/// Build a change request, or `None` when there is no drift.
pub fn build_change_request<'a>(
    template: &ChangeRequestTemplate,
    device_id: &str,
    drifts: &'a [DriftRecord],
) -> Option<ChangeRequest<'a>> {
    if drifts.is_empty() {
        return None;
    }

    Some(ChangeRequest {
        short_description: template.short_description.replace("{device_id}", device_id),
        description: template.description.clone(),
        category: template.category.clone(),
        change_type: template.change_type.clone(),
        priority: template.priority.clone(),
        configuration_item: device_id.to_string(),
        drift_details: drifts,
    })
}

/// Submit a change request to a ticketing system, returning a ticket reference.
#[allow(clippy::result_large_err)]
pub trait TicketingClient: Send + Sync {
    /// Submit a change request.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::ExternalService` if no ticketing system is
    /// configured or the system rejects the request.
    fn submit(&self, request: &ChangeRequest<'_>) -> Result<String, ExError>;
}

/// Client that logs the would-be POST and hands back a generated reference.
#[derive(Debug, Clone)]
pub struct LogTicketingClient {
    endpoint: String,
}

impl LogTicketingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for LogTicketingClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl TicketingClient for LogTicketingClient {
    fn submit(&self, request: &ChangeRequest<'_>) -> Result<String, ExError> {
        let payload = serde_json::to_string_pretty(request).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("open_change_request")
                .with_message(e.to_string())
        })?;
        tracing::warn!(
            endpoint = %self.endpoint,
            cmdb_ci = %request.configuration_item,
            "change request POST (simulated): {}",
            payload
        );
        Ok(uuid::Uuid::now_v7().to_string())
    }
}

/// Noop client: always returns `ExternalService`.
/// Used when ticketing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTicketingClient;

impl TicketingClient for NoopTicketingClient {
    fn submit(&self, _: &ChangeRequest<'_>) -> Result<String, ExError> {
        Err(ExError::new(ExErrorKind::ExternalService)
            .with_op("open_change_request")
            .with_message("No ticketing system configured"))
    }
}
