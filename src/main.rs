//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Interrupt handling (partial results are still reported)
//! - User-facing report and JSON output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use std::process;
use tokio_util::sync::CancellationToken;

use domain_recon::initialization::init_logger_with;
use domain_recon::{report, run_scan, Config};

/// Exit status for a user interrupt (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let color = !config.no_color;
    init_logger_with(config.log_level.clone().into(), color)
        .context("Failed to initialize logger")?;

    // Ctrl-C cancels the scan; the orchestrator returns whatever completed
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping scan...");
            interrupt.cancel();
        }
    });

    let output = config.output.clone();
    match run_scan(config, cancel.clone()).await {
        Ok(result) => {
            println!("{}", report::format_report(&result, color));

            // The artifact is written only after the scan loop has fully
            // returned, so an interrupt never leaves a truncated file
            if let Some(path) = &output {
                match report::write_json(path, &result) {
                    Ok(()) => println!("Results saved to {}", path.display()),
                    Err(e) => {
                        eprintln!("domain_recon error: {e:#}");
                        process::exit(1);
                    }
                }
            }

            if cancel.is_cancelled() {
                warn!("Scan interrupted by user; results above are partial");
                process::exit(EXIT_INTERRUPTED);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_recon error: {e:#}");
            process::exit(1);
        }
    }
}
