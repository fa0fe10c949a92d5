use thiserror::Error;

/// Result type alias using DriftCheckError
pub type Result<T> = std::result::Result<T, DriftCheckError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, CLI exit reporting and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Load/Validation
    InvalidInput,
    NotFound,
    InvalidDocument,
    UnsupportedValue,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::UnsupportedValue => "ERR_UNSUPPORTED_VALUE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus enough
/// context (operation, source name) to explain the failure to an operator.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    source_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            source_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the document, file or sink involved
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the source name context, if any
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(name) = &self.source_name {
            write!(f, " (source: {})", name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for driftcheck operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftCheckError {
    // ===== Load Errors =====
    /// Input document does not exist
    #[error("Document not found: {path}")]
    SourceNotFound { path: String },

    /// Input document exists but could not be read
    #[error("Failed to read {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// Input document is not valid YAML/JSON
    #[error("Failed to parse {path} as {format}: {reason}")]
    ParseFailure {
        path: String,
        format: String,
        reason: String,
    },

    /// Top level of the document is not a mapping
    #[error("Expected top-level mapping in {path}, found {found}")]
    NotAMapping { path: String, found: String },

    /// Mapping key that cannot be represented as a string
    #[error("Unsupported mapping key in {path}: {key}")]
    UnsupportedKey { path: String, key: String },

    /// Value that has no tree representation (e.g. a non-finite float)
    #[error("Unsupported value in {path}: {value}")]
    UnsupportedValue { path: String, value: String },

    // ===== Configuration Errors =====
    /// Configuration file is malformed or fails validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<DriftCheckError> for ExError {
    fn from(err: DriftCheckError) -> Self {
        match err {
            DriftCheckError::SourceNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_document")
                .with_source_name(path)
                .with_message("Document not found"),

            DriftCheckError::SourceUnreadable { path, reason } => ExError::new(ExErrorKind::Io)
                .with_op("load_document")
                .with_source_name(path)
                .with_message(reason),

            DriftCheckError::ParseFailure {
                path,
                format,
                reason,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_document")
                .with_source_name(path)
                .with_message(format!("{} parse error: {}", format, reason)),

            DriftCheckError::NotAMapping { path, found } => {
                ExError::new(ExErrorKind::InvalidDocument)
                    .with_op("load_document")
                    .with_source_name(path)
                    .with_message(format!("Expected top-level mapping, found {}", found))
            }

            DriftCheckError::UnsupportedKey { path, key } => {
                ExError::new(ExErrorKind::UnsupportedValue)
                    .with_op("load_document")
                    .with_source_name(path)
                    .with_message(format!("Unsupported mapping key: {}", key))
            }

            DriftCheckError::UnsupportedValue { path, value } => {
                ExError::new(ExErrorKind::UnsupportedValue)
                    .with_op("load_document")
                    .with_source_name(path)
                    .with_message(format!("Unsupported value: {}", value))
            }

            DriftCheckError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
        }
    }
}
