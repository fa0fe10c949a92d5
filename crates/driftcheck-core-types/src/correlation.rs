//! Correlation types for audit run tracking
//!
//! Every audit run gets a fresh `RunId` so that the report, the telemetry
//! log line and the change-request log line of one run can be joined.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single audit run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new random RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one audit run for correlation
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub device_id: String,
}

impl RunContext {
    /// Create a new context with a fresh RunId for the given device
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            device_id: device_id.into(),
        }
    }
}
