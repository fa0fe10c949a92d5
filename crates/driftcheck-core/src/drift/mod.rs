//! Configuration drift detection.
//!
//! Compares a desired-state tree against an actual-state tree and produces
//! a flat, path-addressed list of [`DriftRecord`]s.
//!
//! ## Entry point
//!
//! ```
//! use driftcheck_core::drift::compare_states;
//! use driftcheck_core::tree::Node;
//! use serde_json::json;
//!
//! let desired = Node::from(json!({"pool": {"members": 2}}));
//! let actual = Node::from(json!({"pool": {"members": 3}}));
//! let drifts = compare_states(&desired, &actual, "root");
//! assert_eq!(drifts[0].path, "root.pool.members");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: mapping keys are visited in lexicographic order over
//!   the union of both sides, so identical inputs yield identical output.
//! - **No over-recursion**: a key present on only one side is reported once,
//!   with its whole subtree as the value.
//! - **Opaque sequences**: sequences are compared as ordered units and never
//!   descended into.

pub mod engine;
pub mod model;
pub mod report;

pub use engine::compare_states;
pub use model::{DriftRecord, DriftStatus, DriftSummary};
pub use report::{DriftRenderer, TableRenderer, ABSENT_MARKER, NO_DRIFT_MESSAGE};
