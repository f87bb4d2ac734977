//! Command-line parsing for the MSME dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the query/aggregation code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "msme", version, about = "MSME market intelligence dashboard")]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a free-text question and print the answer.
    Ask(AskArgs),
    /// List companies (the explorer grid), optionally filtered.
    Companies(CompaniesArgs),
    /// Print the news feed, optionally for one sector.
    News(NewsArgs),
    /// Print header stats and per-sector chart data.
    Stats(StatsArgs),
    /// Launch the interactive TUI.
    ///
    /// Tabs: chat, explorer, news, dashboard.
    Tui(EngineArgs),
}

/// Knobs shared by commands that answer questions.
#[derive(Debug, Parser, Clone, Default)]
pub struct EngineArgs {
    /// Number of companies in the high-growth answer (default: $MSME_TOP_GROWTH or 5).
    #[arg(long)]
    pub top: Option<usize>,

    /// Artificial "thinking" delay in milliseconds (default: $MSME_THINK_DELAY_MS or 0).
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Parser, Clone)]
pub struct AskArgs {
    /// The question; multiple words are joined with spaces.
    #[arg(required_unless_present_any = ["list", "preset"])]
    pub query: Vec<String>,

    /// Print the preset quick queries instead of answering.
    #[arg(long, conflicts_with = "query")]
    pub list: bool,

    /// Answer one of the presets by number (see --list).
    #[arg(long, short = 'p', conflicts_with_all = ["query", "list"])]
    pub preset: Option<usize>,

    /// Emit the structured answer as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct CompaniesArgs {
    /// Case-insensitive text matched against name, location, and products.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact sector name (e.g. "Food Processing").
    #[arg(long, default_value = "")]
    pub sector: String,

    /// Exact risk level (e.g. "Medium-High").
    #[arg(long, default_value = "")]
    pub risk: String,

    /// Emit rows as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Export the filtered rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct NewsArgs {
    /// Exact sector name; omit for the full feed.
    #[arg(long, default_value = "")]
    pub sector: String,

    /// Emit articles as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct StatsArgs {
    /// Emit stats as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_joins_words_and_reads_flags() {
        let cli = Cli::parse_from(["msme", "ask", "risk", "analysis", "--top", "3", "--json"]);
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.query, vec!["risk", "analysis"]);
        assert_eq!(args.engine.top, Some(3));
        assert!(args.json);
    }

    #[test]
    fn ask_list_needs_no_query() {
        let cli = Cli::parse_from(["msme", "ask", "--list"]);
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert!(args.list);
        assert!(args.query.is_empty());
    }

    #[test]
    fn ask_preset_needs_no_query() {
        let cli = Cli::parse_from(["msme", "ask", "--preset", "2"]);
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.preset, Some(2));
    }

    #[test]
    fn companies_filters_default_to_empty() {
        let cli = Cli::parse_from(["msme", "-vv", "companies", "--search", "chennai"]);
        assert_eq!(cli.verbose, 2);
        let Command::Companies(args) = cli.command else {
            panic!("expected companies");
        };
        assert_eq!(args.search, "chennai");
        assert!(args.sector.is_empty());
        assert!(args.risk.is_empty());
    }
}
