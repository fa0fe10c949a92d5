//! Document loading.
//!
//! Reads desired-state and actual-state documents into [`Node`] trees and
//! enforces that every document is rooted at a mapping. Structural problems
//! are reported here so that the comparator never sees malformed input.

use crate::errors::{DriftCheckError, Result};
use crate::tree::Node;
use std::fmt;
use std::path::{Path, PathBuf};

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Infer the format from a file extension.
    ///
    /// `.json` is JSON; everything else is parsed as YAML, which also accepts
    /// JSON documents.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Yaml => f.write_str("YAML"),
            DocumentFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Parse document text into a mapping-rooted tree.
///
/// `origin` names the document in error messages.
///
/// # Errors
///
/// - `ParseFailure` if the text is not valid in `format`, or a YAML merge
///   key does not refer to a mapping
/// - `NotAMapping` if the top level is a sequence or scalar
/// - `UnsupportedKey` / `UnsupportedValue` for YAML content with no tree form
pub fn parse_document(content: &str, format: DocumentFormat, origin: &str) -> Result<Node> {
    let parse_failure = |reason: String| DriftCheckError::ParseFailure {
        path: origin.to_string(),
        format: format.to_string(),
        reason,
    };

    let node = match format {
        DocumentFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            Node::from(value)
        }
        DocumentFormat::Yaml => {
            let mut value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_failure(e.to_string()))?;
            // `<<: *anchor` merge keys expand into the enclosing mapping.
            value
                .apply_merge()
                .map_err(|e| parse_failure(e.to_string()))?;
            Node::from_yaml(value, origin)?
        }
    };

    if !node.is_mapping() {
        return Err(DriftCheckError::NotAMapping {
            path: origin.to_string(),
            found: node.kind().to_string(),
        });
    }

    Ok(node)
}

/// Read and parse a document from disk.
///
/// # Errors
///
/// - `SourceNotFound` if the file does not exist
/// - `SourceUnreadable` for any other read failure
/// - everything [`parse_document`] returns
pub fn load_document(path: &Path, format: DocumentFormat) -> Result<Node> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DriftCheckError::SourceNotFound {
            path: origin.clone(),
        },
        _ => DriftCheckError::SourceUnreadable {
            path: origin.clone(),
            reason: e.to_string(),
        },
    })?;

    parse_document(&content, format, &origin)
}

/// Capability that yields a state tree.
///
/// Desired state and actual state are both read through this trait. A live
/// device query plugs in behind it in place of [`FileSource`].
pub trait StateSource: Send + Sync {
    /// Human-readable description used in logs
    fn describe(&self) -> String;

    /// Produce the mapping-rooted tree.
    ///
    /// # Errors
    ///
    /// Returns a load error when the state cannot be retrieved or is not a
    /// mapping at the top level.
    fn load(&self) -> Result<Node>;
}

/// State read from a YAML or JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileSource {
    /// Source with the format inferred from the file extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }

    /// Source with an explicit format
    pub fn with_format(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

impl StateSource for FileSource {
    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.format)
    }

    fn load(&self) -> Result<Node> {
        load_document(&self.path, self.format)
    }
}
