//! whatchanged CLI - List the changes between releases of GNOME projects.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod identity;
mod output;
mod settings;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr so stdout carries only the changes.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    cli.run()
}
