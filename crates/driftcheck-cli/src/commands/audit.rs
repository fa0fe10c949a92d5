//! Audit command
//!
//! Usage: driftcheck audit [--config <FILE>] [--desired <FILE>] [--actual <FILE>] ...

use super::{EXIT_DRIFT, EXIT_OK};
use clap::{Args, ValueEnum};
use driftcheck_core::change_request::{LogTicketingClient, TicketingClient};
use driftcheck_core::drift::TableRenderer;
use driftcheck_core::logging_facility::{self, Profile};
use driftcheck_core::telemetry::{JsonLinesTelemetrySink, LogTelemetrySink, TelemetrySink};
use driftcheck_core::{run_audit, AuditConfig, AuditConsumers, FileSource};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Desired-state document (overrides config)
    #[arg(long)]
    pub desired: Option<PathBuf>,

    /// Actual-state document (overrides config)
    #[arg(long)]
    pub actual: Option<PathBuf>,

    /// Audited device identifier (overrides config)
    #[arg(long)]
    pub device_id: Option<String>,

    /// Root label prefixed to every drift path (overrides config)
    #[arg(long)]
    pub root: Option<String>,

    /// Append telemetry events to this JSON-lines file (overrides config)
    #[arg(long)]
    pub telemetry_file: Option<PathBuf>,

    /// Do not open a change request even when drift is found
    #[arg(long)]
    pub no_ticket: bool,

    /// Use ASCII table borders
    #[arg(long)]
    pub ascii: bool,

    /// Exit with status 2 when drift is found
    #[arg(long)]
    pub fail_on_drift: bool,

    /// Log output format (overrides config)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Execute audit command
pub fn execute(args: AuditArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;
    config.validate()?;

    let profile = match args.log_format {
        Some(LogFormat::Human) => Profile::Development,
        Some(LogFormat::Json) => Profile::Production,
        None => config.logging.profile,
    };
    logging_facility::init(profile);
    tracing::debug!(?config, "configuration resolved");

    let desired = FileSource::new(&config.desired_path);
    let actual = FileSource::new(&config.actual_path);

    let renderer =
        TableRenderer::new(format!("Drift Report: {}", config.device_id)).with_ascii(args.ascii);

    let telemetry: Box<dyn TelemetrySink> = match &config.telemetry.jsonl_path {
        Some(path) => Box::new(JsonLinesTelemetrySink::new(path)),
        None => Box::new(LogTelemetrySink),
    };

    let ticketing = (config.change_request.enabled && !args.no_ticket)
        .then(|| LogTicketingClient::new(config.change_request.endpoint.as_str()));

    let consumers = AuditConsumers {
        renderer: &renderer,
        telemetry: telemetry.as_ref(),
        ticketing: ticketing.as_ref().map(|c| c as &dyn TicketingClient),
    };

    let outcome = run_audit(&config.audit_request(), &desired, &actual, &consumers)?;

    println!("{}", outcome.report);
    if let Some(reference) = &outcome.ticket_ref {
        println!("Change request opened: {}", reference);
    }
    for failure in &outcome.delivery_failures {
        eprintln!("Warning: {}", failure);
    }

    if args.fail_on_drift && outcome.drift_detected() {
        Ok(EXIT_DRIFT)
    } else {
        Ok(EXIT_OK)
    }
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(args: &AuditArgs) -> Result<AuditConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };

    if let Some(desired) = &args.desired {
        config.desired_path = desired.clone();
    }
    if let Some(actual) = &args.actual {
        config.actual_path = actual.clone();
    }
    if let Some(device_id) = &args.device_id {
        config.device_id = device_id.clone();
    }
    if let Some(root) = &args.root {
        config.root_label = root.clone();
    }
    if let Some(path) = &args.telemetry_file {
        config.telemetry.jsonl_path = Some(path.clone());
    }

    Ok(config)
}
