//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `fdns_filter` library: parses the command line,
//! sets up logging on stderr and runs the scan. Matched hostnames go to
//! stdout, one per line.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use fdns_filter::initialization::init_logger_with;
use fdns_filter::{normalize_args, run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing -file prints usage and exits non-zero here
    let config = Config::parse_from(normalize_args(std::env::args_os()));

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            log::info!(
                "Processed {} record{} ({} valid) in {:.1}s",
                report.processed,
                if report.processed == 1 { "" } else { "s" },
                report.matched,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("fdns_filter error: {:#}", e);
            process::exit(1);
        }
    }
}
