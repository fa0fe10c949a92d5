//! driftcheck core - configuration drift auditing
//!
//! This crate provides:
//! - A three-shape configuration tree (`tree`) built from YAML or JSON
//! - Document loading with top-level mapping enforcement (`loader`)
//! - The recursive desired-vs-actual comparator (`drift`)
//! - Report rendering, telemetry events and change requests as read-only
//!   consumers of the drift list
//! - Audit orchestration, configuration, error and logging facilities
//!
//! The comparator is pure; every side effect lives behind a capability trait
//! (`StateSource`, `TelemetrySink`, `TicketingClient`).

pub mod audit;
pub mod change_request;
pub mod config;
pub mod drift;
pub mod errors;
pub mod loader;
pub mod logging_facility;
pub mod telemetry;
pub mod tree;

pub use driftcheck_core_types::schema;

// Re-export commonly used types
pub use audit::{run_audit, AuditConsumers, AuditOutcome, AuditRequest};
pub use config::AuditConfig;
pub use drift::{compare_states, DriftRecord, DriftStatus, DriftSummary};
pub use errors::{DriftCheckError, ExError, ExErrorKind, Result};
pub use loader::{FileSource, StateSource};
pub use tree::{Node, Scalar};
