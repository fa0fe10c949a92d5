//! Drift computation engine.
//!
//! The core entry point is [`compare_states`], which walks a desired-state
//! tree and an actual-state tree in lockstep and produces a list of
//! [`DriftRecord`]s.

use crate::drift::model::DriftRecord;
use crate::tree::Node;
use std::collections::{BTreeMap, BTreeSet};

/// Compare a desired-state tree against an actual-state tree.
///
/// Every emitted path starts with `root_path`, followed by the dotted chain of
/// mapping keys leading to the drifting node. The result is empty if and only
/// if both trees are equal at every path.
///
/// - Both sides mappings: keys from the union of both sides are visited in
///   lexicographic order. A key on one side only yields a single
///   `Missing`/`Unexpected` record carrying the whole subtree. A key on both
///   sides is compared recursively.
/// - Otherwise: the two nodes are compared for exact equality (sequences
///   as ordered units) and a single `Mismatch` is emitted if they differ.
///
/// Pure and infallible.
pub fn compare_states(desired: &Node, actual: &Node, root_path: &str) -> Vec<DriftRecord> {
    let mut drifts = Vec::new();
    compare_into(desired, actual, root_path, &mut drifts);
    tracing::debug!(
        root_path = root_path,
        drift_count = drifts.len(),
        "comparison complete"
    );
    drifts
}

fn compare_into(desired: &Node, actual: &Node, path: &str, drifts: &mut Vec<DriftRecord>) {
    match (desired, actual) {
        (Node::Mapping(desired_map), Node::Mapping(actual_map)) => {
            compare_mappings(desired_map, actual_map, path, drifts)
        }
        _ => {
            if desired != actual {
                drifts.push(DriftRecord::mismatch(path, desired.clone(), actual.clone()));
            }
        }
    }
}

fn compare_mappings(
    desired: &BTreeMap<String, Node>,
    actual: &BTreeMap<String, Node>,
    path: &str,
    drifts: &mut Vec<DriftRecord>,
) {
    let keys: BTreeSet<&str> = desired
        .keys()
        .chain(actual.keys())
        .map(String::as_str)
        .collect();

    for key in keys {
        let child_path = format!("{}.{}", path, key);
        match (desired.get(key), actual.get(key)) {
            (None, Some(actual_child)) => {
                drifts.push(DriftRecord::unexpected(child_path, actual_child.clone()));
            }
            (Some(desired_child), None) => {
                drifts.push(DriftRecord::missing(child_path, desired_child.clone()));
            }
            (Some(desired_child), Some(actual_child)) => {
                compare_into(desired_child, actual_child, &child_path, drifts);
            }
            // Every key came from one of the two maps.
            (None, None) => {}
        }
    }
}
