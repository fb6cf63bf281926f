//! Command-line interface for oilempires.
//!
//! This module provides the CLI structure and the text renderers for the
//! `oilempires` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    CommentCommand, CompaniesCommand, ConfigCommand, FeedbackCommand, MapCommand, OutputFormat,
    ProfilesCommand, RateCommand, StatusCommand, TabsCommand, TimelineCommand,
};

/// oilempires - The rise of the oil empires
///
/// Browse the companies, map and timeline of the early oil monopolies, and
/// read or leave visitor feedback on each section.
#[derive(Debug, Parser)]
#[command(name = "oilempires")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Read settings from this TOML file instead of the default location
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List oil companies, a page at a time
    Companies(CompaniesCommand),

    /// Show comments and the rating summary for a section
    Feedback(FeedbackCommand),

    /// Leave a comment on a section
    Comment(CommentCommand),

    /// Rate a section from 1 to 5 stars
    Rate(RateCommand),

    /// Step through the oil industry timeline
    Timeline(TimelineCommand),

    /// Show the global oil control map
    Map(MapCommand),

    /// Show company profiles
    Profiles(ProfilesCommand),

    /// Show the page tabs and the feedback section each one maps to
    Tabs(TabsCommand),

    /// Load the reference companies into the content store
    Seed,

    /// Show content store statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Verbosity implied by `-v` and `-q`.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "oilempires");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["oilempires", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["oilempires", "-q", "-v", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_tabs() {
        let cli = Cli::try_parse_from(["oilempires", "tabs", "--select", "methods"]).unwrap();
        match cli.command {
            Command::Tabs(cmd) => assert_eq!(cmd.select.as_deref(), Some("methods")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_companies() {
        let cli =
            Cli::try_parse_from(["oilempires", "companies", "--page", "2", "--format", "json"])
                .unwrap();
        match cli.command {
            Command::Companies(cmd) => {
                assert_eq!(cmd.page, 2);
                assert_eq!(cmd.format, OutputFormat::Json);
                assert!(cmd.select.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_comment() {
        let cli = Cli::try_parse_from([
            "oilempires",
            "comment",
            "timeline",
            "--body",
            "Fascinating",
            "--identity",
            "Ida",
        ])
        .unwrap();
        match cli.command {
            Command::Comment(cmd) => {
                assert_eq!(cmd.section, "timeline");
                assert_eq!(cmd.body, "Fascinating");
                assert!(cmd.name.is_none());
                assert_eq!(cmd.identity.as_deref(), Some("Ida"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_comment_requires_body() {
        assert!(Cli::try_parse_from(["oilempires", "comment", "overview"]).is_err());
    }

    #[test]
    fn test_parse_rate() {
        let cli = Cli::try_parse_from(["oilempires", "rate", "overview", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Rate(RateCommand { value: 4, .. })
        ));
    }

    #[test]
    fn test_parse_views() {
        let cli = Cli::try_parse_from(["oilempires", "timeline", "--index", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Timeline(TimelineCommand { index: Some(3) })
        ));

        let cli = Cli::try_parse_from(["oilempires", "map", "--region", "us"]).unwrap();
        assert!(matches!(cli.command, Command::Map(_)));

        let cli = Cli::try_parse_from(["oilempires", "profiles", "-e", "shell"]).unwrap();
        assert!(matches!(cli.command, Command::Profiles(_)));

        let cli = Cli::try_parse_from(["oilempires", "seed"]).unwrap();
        assert!(matches!(cli.command, Command::Seed));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["oilempires", "config", "validate", "--file", "/tmp/c.toml"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["oilempires", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
