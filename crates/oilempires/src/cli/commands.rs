//! Argument structs for each subcommand.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// `oilempires companies`
#[derive(Debug, Args)]
pub struct CompaniesCommand {
    /// Page to show (1-based, clamped to the last page)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Show details for the company with this name
    #[arg(short, long, value_name = "NAME")]
    pub select: Option<String>,

    /// How to print the page
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// `oilempires feedback`
#[derive(Debug, Args)]
pub struct FeedbackCommand {
    /// Section key (e.g. "overview", "timeline")
    pub section: String,

    /// How to print comments and the rating summary
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// `oilempires comment`
#[derive(Debug, Args)]
pub struct CommentCommand {
    /// Section key to comment on
    pub section: String,

    /// Comment text
    #[arg(short, long)]
    pub body: String,

    /// Your name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Comment as a signed-in visitor with this display name
    #[arg(long, value_name = "NAME")]
    pub identity: Option<String>,
}

/// `oilempires rate`
#[derive(Debug, Args)]
pub struct RateCommand {
    /// Section key to rate
    pub section: String,

    /// Stars, 1 to 5
    pub value: u8,
}

/// `oilempires timeline`
#[derive(Debug, Args)]
pub struct TimelineCommand {
    /// Event to show (0-based)
    #[arg(short, long)]
    pub index: Option<usize>,
}

/// `oilempires map`
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Highlight a region and its routes (e.g. "burma")
    #[arg(short, long, value_name = "ID")]
    pub region: Option<String>,
}

/// `oilempires profiles`
#[derive(Debug, Args)]
pub struct ProfilesCommand {
    /// Expand this profile instead of the default (e.g. "shell")
    #[arg(short, long, value_name = "ID")]
    pub expand: Option<String>,
}

/// `oilempires tabs`
#[derive(Debug, Args)]
pub struct TabsCommand {
    /// Make this tab active (overview, companies, methods, timeline)
    #[arg(short, long, value_name = "ID")]
    pub select: Option<String>,
}

/// `oilempires status`
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Print row counts as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// `oilempires config ...`
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration
    Show {
        /// Print as JSON instead of sections
        #[arg(short, long)]
        json: bool,
    },

    /// Print where the config file is looked for
    Path,

    /// Load a config file and report whether it is usable
    Validate {
        /// File to check (defaults to the standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// How listing commands print their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One record per block of lines
    #[default]
    Plain,
    /// Aligned columns
    Table,
    /// Pretty-printed JSON
    Json,
}
