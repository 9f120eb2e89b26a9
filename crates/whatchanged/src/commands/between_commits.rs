//! Between-commits command.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};
use whatchanged_core::{RangeAggregator, Version};
use whatchanged_git::{PackageUpdate, RawCommit, Repository};
use whatchanged_links::LinkFormatter;

use crate::identity::{NixResolver, ProjectResolver};
use crate::output::{indent, join_records};
use crate::settings::Settings;

/// Shown when a commit does not announce a package update we can follow.
pub const UNRECOGNIZED: &str = "Unable to recognize updated package.";

/// Arguments for the between-commits command.
#[derive(Debug, Args)]
pub struct BetweenCommitsArgs {
    /// First commit
    pub start_commit: String,

    /// Last commit
    #[arg(default_value = "HEAD")]
    pub end_commit: String,
}

/// Runs the between-commits command.
pub fn run(args: &BetweenCommitsArgs, settings: &Settings) -> Result<()> {
    let current_dir = std::env::current_dir().context("failed to read current directory")?;
    let repo = Repository::discover(&current_dir).context("failed to open repository")?;
    let commits = repo
        .commits_between(&args.start_commit, &args.end_commit)
        .context("failed to walk commits")?;

    let resolver = NixResolver::new(repo.path());
    let aggregator = settings.aggregator(settings.source());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for commit in &commits {
        let changes = changes_for_commit(commit, &resolver, &aggregator, settings.formatter());
        writeln!(out, "{}: {}", commit.hash, commit.subject())?;
        writeln!(out, "{}", indent(&changes))?;
        out.flush()?;
    }

    Ok(())
}

/// Describes what changed in the package updated by `commit`.
///
/// Never fails: every problem is described in the returned text.
pub fn changes_for_commit(
    commit: &RawCommit,
    resolver: &dyn ProjectResolver,
    aggregator: &RangeAggregator,
    formatter: &dyn LinkFormatter,
) -> String {
    let Some(update) = PackageUpdate::parse(commit.subject()) else {
        info!(hash = %commit.short_hash(), subject = %commit.subject(), "skipping commit");
        return UNRECOGNIZED.to_string();
    };

    let (old, new) = match (
        Version::parse(&update.old_version),
        Version::parse(&update.new_version),
    ) {
        (Ok(old), Ok(new)) => (old, new),
        (Err(err), _) | (_, Err(err)) => {
            info!(hash = %commit.short_hash(), error = %err, "skipping commit");
            return UNRECOGNIZED.to_string();
        }
    };

    let project = match resolver.resolve(&update.attr) {
        Ok(project) => project,
        Err(err) => return err.to_string(),
    };
    debug!(
        hash = %commit.short_hash(),
        date = %commit.date,
        attr = %update.attr,
        %project,
        "resolved package update"
    );

    match aggregator.changes_in_range(&project, &old, &new, formatter) {
        Ok(changes) => {
            let text = join_records(changes);
            if text.is_empty() {
                UNRECOGNIZED.to_string()
            } else {
                text
            }
        }
        Err(err) => format!("Unable to list releases of “{project}”: {err}"),
    }
}
