//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use stackit_domain::{FilterMode, Tag};

/// StackIt - a small Q&A forum in your terminal.
#[derive(Debug, Parser)]
#[command(name = "stackit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Sign in as this identity
    #[arg(short, long, global = true, env = "STACKIT_USER")]
    pub user: Option<String>,

    /// Questions per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a page of the built-in question catalog
    List(ListArgs),

    /// Print the tag catalog
    Tags,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only show questions with this tag
    #[arg(short, long, value_parser = parse_tag)]
    pub tag: Option<Tag>,

    /// Listing mode
    #[arg(short, long, value_enum, default_value = "all")]
    pub mode: ModeArg,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Listing mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Collection order
    All,
    /// Most recent first
    Newest,
    /// Questions without answers
    Unanswered,
}

fn parse_tag(s: &str) -> Result<Tag, String> {
    s.parse()
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::All => FilterMode::All,
            ModeArg::Newest => FilterMode::Newest,
            ModeArg::Unanswered => FilterMode::Unanswered,
        }
    }
}
