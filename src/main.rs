//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ipgrep` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::process;

use ipgrep::initialization::init_logger_with;
use ipgrep::{run, Opt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let opt = Opt::parse();

    // Initialize logger based on the CLI flags
    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the pipeline; report rows go to stdout, everything else to stderr
    match run(opt).await {
        Ok(report) => {
            info!(
                "Wrote {} report row{} ({} names, {} literal addresses, {} resolved pairs, {} annotated) in {:.1}s",
                report.rows_written,
                if report.rows_written == 1 { "" } else { "s" },
                report.names_extracted,
                report.addresses_extracted,
                report.resolved_pairs,
                report.annotated_addresses,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("ipgrep error: {:#}", e);
            process::exit(1);
        }
    }
}
