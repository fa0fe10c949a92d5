//! driftcheck CLI
//!
//! Command-line interface for configuration drift auditing

use clap::{Parser, Subcommand};
use driftcheck_core::{DriftCheckError, ExError};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "driftcheck")]
#[command(about = "driftcheck - Desired vs actual configuration drift auditor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full audit: compare, report, emit telemetry, open a change request
    Audit(commands::audit::AuditArgs),
    /// Compare two documents and print the drift list only
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit(args) => commands::audit::execute(args),
        Commands::Compare(args) => commands::compare::execute(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<DriftCheckError>() {
                Some(err) => eprintln!("Error: {}", ExError::from(err.clone())),
                None => eprintln!("Error: {}", e),
            }
            std::process::exit(commands::EXIT_ERROR);
        }
    }
}
