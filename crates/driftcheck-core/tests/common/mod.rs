use driftcheck_core::change_request::{ChangeRequest, TicketingClient};
use driftcheck_core::errors::{DriftCheckError, ExError, ExErrorKind, Result};
use driftcheck_core::loader::StateSource;
use driftcheck_core::telemetry::{TelemetryEvent, TelemetrySink};
use driftcheck_core::tree::Node;
use serde_json::Value;
use std::sync::Mutex;

/// Build a tree from a JSON literal
#[allow(dead_code)]
pub fn node(value: Value) -> Node {
    Node::from(value)
}

/// State source backed by an in-memory tree
#[allow(dead_code)]
pub struct InMemorySource {
    pub name: String,
    pub tree: Node,
}

#[allow(dead_code)]
impl InMemorySource {
    pub fn new(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            tree: Node::from(value),
        }
    }
}

impl StateSource for InMemorySource {
    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn load(&self) -> Result<Node> {
        Ok(self.tree.clone())
    }
}

/// State source that always fails as if the device were unreachable
#[allow(dead_code)]
pub struct UnreachableSource;

impl StateSource for UnreachableSource {
    fn describe(&self) -> String {
        "unreachable".to_string()
    }

    fn load(&self) -> Result<Node> {
        Err(DriftCheckError::SourceNotFound {
            path: "device://unreachable".to_string(),
        })
    }
}

/// Telemetry sink that keeps a JSON copy of every event
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTelemetrySink {
    pub events: Mutex<Vec<Value>>,
}

impl TelemetrySink for RecordingTelemetrySink {
    fn emit(&self, event: &TelemetryEvent<'_>) -> std::result::Result<(), ExError> {
        let value = serde_json::to_value(event)
            .map_err(|e| ExError::new(ExErrorKind::Serialization).with_message(e.to_string()))?;
        self.events.lock().unwrap().push(value);
        Ok(())
    }
}

/// Telemetry sink that rejects every event
#[allow(dead_code)]
pub struct FailingTelemetrySink;

impl TelemetrySink for FailingTelemetrySink {
    fn emit(&self, _: &TelemetryEvent<'_>) -> std::result::Result<(), ExError> {
        Err(ExError::new(ExErrorKind::ExternalService)
            .with_op("emit_telemetry")
            .with_message("monitoring sink unavailable"))
    }
}

/// Ticketing client that keeps a JSON copy of every request
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTicketingClient {
    pub requests: Mutex<Vec<Value>>,
}

impl TicketingClient for RecordingTicketingClient {
    fn submit(&self, request: &ChangeRequest<'_>) -> std::result::Result<String, ExError> {
        let value = serde_json::to_value(request)
            .map_err(|e| ExError::new(ExErrorKind::Serialization).with_message(e.to_string()))?;
        let mut requests = self.requests.lock().unwrap();
        requests.push(value);
        Ok(format!("CHG{:07}", requests.len()))
    }
}
