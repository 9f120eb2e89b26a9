//! Subcommands.

pub mod between_commits;
pub mod between_versions;
