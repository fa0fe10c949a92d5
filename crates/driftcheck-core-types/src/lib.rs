//! Core types shared across driftcheck crates
//!
//! This crate provides foundational types used by the error and logging
//! facilities of `driftcheck-core` and by the CLI:
//!
//! - **Correlation types**: RunId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, RunId};
