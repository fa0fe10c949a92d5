//! Compare command
//!
//! Usage: driftcheck compare <DESIRED> <ACTUAL> [--root <LABEL>] [--json]

use super::{EXIT_DRIFT, EXIT_OK};
use clap::Args;
use driftcheck_core::drift::{DriftRenderer, TableRenderer};
use driftcheck_core::{compare_states, FileSource, StateSource};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Desired-state document (YAML or JSON)
    pub desired: PathBuf,

    /// Actual-state document (YAML or JSON)
    pub actual: PathBuf,

    /// Root label prefixed to every drift path
    #[arg(long, default_value = "root")]
    pub root: String,

    /// Print the drift list as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Use ASCII table borders
    #[arg(long)]
    pub ascii: bool,

    /// Exit with status 2 when drift is found
    #[arg(long)]
    pub fail_on_drift: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desired = FileSource::new(&args.desired).load()?;
    let actual = FileSource::new(&args.actual).load()?;

    let drifts = compare_states(&desired, &actual, &args.root);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&drifts)?);
    } else {
        let renderer = TableRenderer::default().with_ascii(args.ascii);
        println!("{}", renderer.render(&drifts));
    }

    if args.fail_on_drift && !drifts.is_empty() {
        Ok(EXIT_DRIFT)
    } else {
        Ok(EXIT_OK)
    }
}
