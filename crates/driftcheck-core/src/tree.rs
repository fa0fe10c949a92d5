//! In-memory configuration tree.
//!
//! Both the desired-state and the actual-state documents are converted into
//! [`Node`] before comparison, whatever format they were read from. A node is
//! exactly one of three shapes: mapping, sequence or scalar.

use crate::errors::{DriftCheckError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A leaf value.
///
/// Equality is type-strict (`true` never equals `1`), but numbers compare by
/// numeric value so that an integer `2` equals a float `2.0`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Number(a), Scalar::Number(b)) => numbers_equal(a, b),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    match (a.as_f64().filter(|_| a.is_f64()), b.as_f64().filter(|_| b.is_f64())) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => float_equals_integer(x, b),
        (None, Some(y)) => float_equals_integer(y, a),
        (None, None) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            // At least one side is a u64 above i64::MAX.
            _ => a.as_u64().is_some() && a.as_u64() == b.as_u64(),
        },
    }
}

/// Exact comparison; no integer is rounded through `f64`.
fn float_equals_integer(float: f64, integer: &serde_json::Number) -> bool {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

    if float.fract() != 0.0 {
        return false;
    }
    if let Some(i) = integer.as_i64() {
        return (-TWO_POW_63..TWO_POW_63).contains(&float) && float as i64 == i;
    }
    if let Some(u) = integer.as_u64() {
        return (0.0..TWO_POW_64).contains(&float) && float as u64 == u;
    }
    false
}

/// A node of a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// String-keyed mapping; keys are kept sorted.
    Mapping(BTreeMap<String, Node>),
    /// Ordered list, compared as a whole unit.
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

/// Shape of a node, used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        };
        f.write_str(label)
    }
}

impl Node {
    /// An empty mapping.
    pub fn empty_mapping() -> Self {
        Node::Mapping(BTreeMap::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Convert a parsed YAML value into a tree.
    ///
    /// Scalar mapping keys (numbers, booleans, null) are stringified. Tags are
    /// dropped in favour of the tagged value. `origin` names the document in
    /// errors.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKey` for a sequence or mapping used as a key, or two keys
    ///   that stringify to the same text
    /// - `UnsupportedValue` for a non-finite float
    pub fn from_yaml(value: serde_yaml::Value, origin: &str) -> Result<Node> {
        use serde_yaml::Value as Y;

        match value {
            Y::Null => Ok(Node::Scalar(Scalar::Null)),
            Y::Bool(b) => Ok(Node::Scalar(Scalar::Bool(b))),
            Y::Number(n) => yaml_number(&n, origin).map(|n| Node::Scalar(Scalar::Number(n))),
            Y::String(s) => Ok(Node::Scalar(Scalar::String(s))),
            Y::Sequence(items) => items
                .into_iter()
                .map(|item| Node::from_yaml(item, origin))
                .collect::<Result<Vec<_>>>()
                .map(Node::Sequence),
            Y::Mapping(mapping) => {
                let mut map = BTreeMap::new();
                for (key, child) in mapping {
                    let key = yaml_key(key, origin)?;
                    if map.contains_key(&key) {
                        return Err(DriftCheckError::UnsupportedKey {
                            path: origin.to_string(),
                            key: format!("{} (duplicate after normalisation)", key),
                        });
                    }
                    let child = Node::from_yaml(child, origin)?;
                    map.insert(key, child);
                }
                Ok(Node::Mapping(map))
            }
            Y::Tagged(tagged) => Node::from_yaml(tagged.value, origin),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number, origin: &str) -> Result<serde_json::Number> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| DriftCheckError::UnsupportedValue {
            path: origin.to_string(),
            value: n.to_string(),
        })
}

fn yaml_key(key: serde_yaml::Value, origin: &str) -> Result<String> {
    use serde_yaml::Value as Y;

    match key {
        Y::String(s) => Ok(s),
        Y::Bool(b) => Ok(b.to_string()),
        Y::Number(n) => Ok(n.to_string()),
        Y::Null => Ok("null".to_string()),
        Y::Tagged(tagged) => yaml_key(tagged.value, origin),
        other => Err(DriftCheckError::UnsupportedKey {
            path: origin.to_string(),
            key: format!("{:?}", other),
        }),
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as J;

        match value {
            J::Null => Node::Scalar(Scalar::Null),
            J::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            J::Number(n) => Node::Scalar(Scalar::Number(n)),
            J::String(s) => Node::Scalar(Scalar::String(s)),
            J::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            J::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl fmt::Display for Node {
    /// Compact JSON rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
