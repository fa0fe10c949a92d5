//! Audit configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! runnable configuration. Relative document paths are resolved against the
//! directory of the configuration file.

use crate::audit::AuditRequest;
use crate::change_request::{ChangeRequestTemplate, DEFAULT_ENDPOINT};
use crate::errors::{DriftCheckError, Result};
use crate::logging_facility::Profile;
use crate::telemetry::DEFAULT_EVENT_TYPE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default device identifier
pub const DEFAULT_DEVICE_ID: &str = "f5-bigip-a1";
/// Default root path label
pub const DEFAULT_ROOT_LABEL: &str = "virtual_server_root";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub device_id: String,
    pub root_label: String,
    pub desired_path: PathBuf,
    pub actual_path: PathBuf,
    pub telemetry: TelemetryConfig,
    pub change_request: ChangeRequestConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    pub event_type: String,
    /// Append events to this file as JSON lines instead of logging them
    pub jsonl_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChangeRequestConfig {
    pub enabled: bool,
    pub endpoint: String,
    #[serde(flatten)]
    pub template: ChangeRequestTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_string(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            desired_path: PathBuf::from("gold_standard.yaml"),
            actual_path: PathBuf::from("f5_actual_state.json"),
            telemetry: TelemetryConfig::default(),
            change_request: ChangeRequestConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            jsonl_path: None,
        }
    }
}

impl Default for ChangeRequestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            template: ChangeRequestTemplate::default(),
        }
    }
}

impl AuditConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DriftCheckError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Load configuration from a file, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound`/`SourceUnreadable` if the file cannot be read
    /// and `InvalidConfig` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
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

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Make relative document paths relative to `base` instead of the
    /// working directory.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.desired_path);
        resolve(&mut self.actual_path);
        if let Some(p) = self.telemetry.jsonl_path.as_mut() {
            resolve(p);
        }
    }

    /// Reject configurations that would produce unusable output.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first empty required field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("device_id", self.device_id.as_str()),
            ("root_label", self.root_label.as_str()),
            ("telemetry.event_type", self.telemetry.event_type.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DriftCheckError::InvalidConfig {
                    reason: format!("`{}` must not be empty", field),
                });
            }
        }
        Ok(())
    }

    /// Audit parameters derived from this configuration
    pub fn audit_request(&self) -> AuditRequest {
        AuditRequest {
            device_id: self.device_id.clone(),
            root_label: self.root_label.clone(),
            event_type: self.telemetry.event_type.clone(),
            ticket_template: self.change_request.template.clone(),
        }
    }
}
