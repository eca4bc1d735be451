//! verstub CLI library
//!
//! Exposes [`run`] for the binary and [`execute`] for callers that already
//! hold a parsed [`Cli`].

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use verstub_core::{DeployConfig, DeployReport, UpdateOutcome, deploy};

pub mod cli;
pub mod error;
pub mod utils;

pub use cli::Cli;
pub use error::{CliError, ErrorCategory, category_from_error};

use utils::logging::initialize_logging;

/// Parse arguments, set up logging and run one deployment.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the deployment fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let report = execute(&cli).await?;
    if !cli.quiet {
        print_summary(&report);
    }
    Ok(())
}

/// Build a [`DeployConfig`] from parsed arguments.
///
/// # Errors
///
/// Returns a usage error if the URL or version is rejected.
pub fn build_config(cli: &Cli) -> Result<DeployConfig> {
    let config = DeployConfig::new(&cli.url, &cli.doc_version, &cli.root)
        .map_err(CliError::from)?
        .with_fetch_timeout(Duration::from_secs(cli.timeout));
    debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Run the deployment described by `cli`.
///
/// # Errors
///
/// Returns a categorized [`CliError`] when any stage fails.
pub async fn execute(cli: &Cli) -> Result<DeployReport> {
    let config = build_config(cli)?;
    let report = deploy(&config)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("deploying {} to {}", config.version(), cli.root.display()))?;
    Ok(report)
}

fn print_summary(report: &DeployReport) {
    let versions = report.manifest.len();
    match report.outcome {
        UpdateOutcome::Added { latest: true } => println!(
            "{} {} as latest ({versions} versions)",
            "Added".green(),
            added_version(report).bold()
        ),
        UpdateOutcome::Added { latest: false } => println!(
            "{} {} ({versions} versions)",
            "Added".green(),
            added_version(report).bold()
        ),
        UpdateOutcome::AlreadyPresent => println!(
            "{} manifest unchanged ({versions} versions)",
            "Already listed:".yellow()
        ),
    }
    println!(
        "  latest: {}  dev: {}  stubs: {}  manifest: {}",
        report.latest_version.as_deref().unwrap_or("-"),
        report.dev_version.as_deref().unwrap_or("-"),
        report.redirects.len(),
        report.manifest_source
    );
}

fn added_version(report: &DeployReport) -> &str {
    report
        .manifest
        .entries()
        .last()
        .map_or("-", |entry| entry.version.as_str())
}
