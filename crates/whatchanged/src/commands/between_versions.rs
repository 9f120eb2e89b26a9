//! Between-versions command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;
use whatchanged_core::Version;

use crate::output::write_records;
use crate::settings::Settings;

/// Arguments for the between-versions command.
#[derive(Debug, Args)]
pub struct BetweenVersionsArgs {
    /// Name of the project directory on the release server
    #[arg(value_name = "PACKAGE_NAME")]
    pub project: String,

    /// Old version of the package (excluded)
    pub start_version: String,

    /// New version of the package (included)
    pub end_version: String,
}

/// Runs the between-versions command.
pub fn run(args: &BetweenVersionsArgs, settings: &Settings) -> Result<()> {
    let start = Version::parse(&args.start_version).context("invalid start version")?;
    let end = Version::parse(&args.end_version).context("invalid end version")?;

    let aggregator = settings.aggregator(settings.source());
    let changes = aggregator
        .changes_in_range(&args.project, &start, &end, settings.formatter())
        .with_context(|| format!("failed to list releases of {}", args.project))?;

    let stdout = std::io::stdout();
    let written = write_records(&mut stdout.lock(), changes).context("failed to write output")?;
    debug!(project = %args.project, written, "done");

    Ok(())
}
