//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use whatchanged_config::OutputFormat;

use crate::commands;
use crate::settings::Settings;

/// List the changes between releases of GNOME projects.
#[derive(Debug, Parser)]
#[command(name = "whatchanged")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for hyperlinks (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Configuration file (default: whatchanged.toml in the current directory or a parent)
    #[arg(long, global = true, env = "WHATCHANGED_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// No postprocessing
    Plain,
    /// ANSI terminal escape sequences for hyperlinks
    Terminal,
    /// HTML links
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Obtain the list of changes between two versions of a project
    BetweenVersions(commands::between_versions::BetweenVersionsArgs),

    /// Obtain the list of changes for package updates in a commit range
    BetweenCommits(commands::between_commits::BetweenCommitsArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref(), self.format.map(Into::into))?;

        match self.command {
            Commands::BetweenVersions(args) => commands::between_versions::run(&args, &settings),
            Commands::BetweenCommits(args) => commands::between_commits::run(&args, &settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_between_versions() {
        let cli = Cli::try_parse_from([
            "whatchanged",
            "--format",
            "html",
            "between-versions",
            "gtk",
            "3.24.28",
            "3.24.29",
        ])
        .unwrap();

        assert!(matches!(cli.format, Some(FormatArg::Html)));
        match cli.command {
            Commands::BetweenVersions(args) => {
                assert_eq!(args.project, "gtk");
                assert_eq!(args.start_version, "3.24.28");
                assert_eq!(args.end_version, "3.24.29");
            }
            Commands::BetweenCommits(_) => panic!("expected between-versions"),
        }
    }

    #[test]
    fn test_parse_between_commits_defaults_to_head() {
        let cli = Cli::try_parse_from(["whatchanged", "between-commits", "abc1234", "-v"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::BetweenCommits(args) => {
                assert_eq!(args.start_commit, "abc1234");
                assert_eq!(args.end_commit, "HEAD");
            }
            Commands::BetweenVersions(_) => panic!("expected between-commits"),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "whatchanged",
            "--format",
            "markdown",
            "between-versions",
            "gtk",
            "1",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Plain), OutputFormat::Plain);
        assert_eq!(OutputFormat::from(FormatArg::Terminal), OutputFormat::Terminal);
        assert_eq!(OutputFormat::from(FormatArg::Html), OutputFormat::Html);
    }
}
