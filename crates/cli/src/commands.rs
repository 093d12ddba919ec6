//! CLI command definitions for chatlens.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path (TOML)
    #[arg(short, long, env = "CHATLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a chat transcript export
    Analyze(AnalyzeArgs),

    /// List selectable users and the transcript date range
    Users(UsersArgs),
}

/// Analysis arguments.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Transcript export file
    pub input: PathBuf,

    /// View to compute
    #[arg(value_enum, default_value_t = View::Report)]
    pub view: View,

    /// Author to analyze, or "Overall" for everyone
    #[arg(short, long, default_value = "Overall")]
    pub user: String,

    /// First date included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Media placeholder override
    #[arg(long)]
    pub media_placeholder: Option<String>,

    /// Ranking cutoff override for the selected view
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// User listing arguments.
#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Transcript export file
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Analysis views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Message, word, media, and link counts
    Stats,
    /// Messages per month
    Monthly,
    /// Messages per day
    Daily,
    /// Messages per weekday
    Weekdays,
    /// Messages per calendar month name
    Months,
    /// Weekday by hour activity matrix
    Heatmap,
    /// Busiest participants (Overall only)
    Users,
    /// Most common words
    Words,
    /// Word cloud terms
    Wordcloud,
    /// Emoji ranking
    Emoji,
    /// Sentiment distribution, trend, and extremes
    Sentiment,
    /// Every view
    Report,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON format
    Json,
}
