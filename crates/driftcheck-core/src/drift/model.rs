//! Drift output types.
//!
//! All types implement `Debug, Clone, Serialize, PartialEq`. Absent values
//! are `None` and serialize as `null`; the status tells which side is absent.

use crate::tree::Node;
use serde::Serialize;
use std::fmt;

/// Classification of a single difference.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriftStatus {
    /// Present in desired state, absent from actual state
    #[serde(rename = "missing_key")]
    Missing,
    /// Present in actual state, absent from desired state
    #[serde(rename = "unexpected_key")]
    Unexpected,
    /// Present on both sides with differing values
    #[serde(rename = "value_mismatch")]
    Mismatch,
}

impl DriftStatus {
    /// Stable wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftStatus::Missing => "missing_key",
            DriftStatus::Unexpected => "unexpected_key",
            DriftStatus::Mismatch => "value_mismatch",
        }
    }
}

impl fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One difference between desired and actual state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriftRecord {
    /// Dotted path from the root label to the drifting node
    pub path: String,
    pub status: DriftStatus,
    /// Value in the desired tree, `None` when absent
    pub desired: Option<Node>,
    /// Value in the actual tree, `None` when absent
    pub actual: Option<Node>,
}

impl DriftRecord {
    pub fn missing(path: impl Into<String>, desired: Node) -> Self {
        Self {
            path: path.into(),
            status: DriftStatus::Missing,
            desired: Some(desired),
            actual: None,
        }
    }

    pub fn unexpected(path: impl Into<String>, actual: Node) -> Self {
        Self {
            path: path.into(),
            status: DriftStatus::Unexpected,
            desired: None,
            actual: Some(actual),
        }
    }

    pub fn mismatch(path: impl Into<String>, desired: Node, actual: Node) -> Self {
        Self {
            path: path.into(),
            status: DriftStatus::Mismatch,
            desired: Some(desired),
            actual: Some(actual),
        }
    }
}

/// Per-status counts for a drift list.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DriftSummary {
    pub missing: usize,
    pub unexpected: usize,
    pub mismatched: usize,
}

impl DriftSummary {
    pub fn from_records(drifts: &[DriftRecord]) -> Self {
        drifts
            .iter()
            .fold(DriftSummary::default(), |mut acc, d| {
                match d.status {
                    DriftStatus::Missing => acc.missing += 1,
                    DriftStatus::Unexpected => acc.unexpected += 1,
                    DriftStatus::Mismatch => acc.mismatched += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.missing + self.unexpected + self.mismatched
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DriftSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} drift(s): {} missing, {} unexpected, {} mismatched",
            self.total(),
            self.missing,
            self.unexpected,
            self.mismatched
        )
    }
}
