//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads environment defaults and sets up logging
//! - builds the embedded dataset
//! - dispatches to the text reports or the TUI

use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{AskArgs, Command, CompaniesArgs, NewsArgs, StatsArgs};
use crate::config::Settings;
use crate::data::Dataset;
use crate::domain::{CompanyFilter, HeaderStats, SectorSeriesPoint};
use crate::error::{AppError, EXIT_USAGE};
use crate::query::{QUICK_QUERIES, header_stats, sector_series};
use crate::report::format;

pub mod pipeline;

/// Entry point for the `msme` binary.
pub fn run() -> Result<(), AppError> {
    // `msme` alone opens the dashboard, like `msme tui`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let settings = Settings::from_env()?;
    let is_tui = matches!(cli.command, Command::Tui(_));
    init_tracing(cli.verbose, settings.log_file.as_deref(), is_tui)?;

    let dataset = Dataset::embedded()?;

    match cli.command {
        Command::Ask(args) => handle_ask(&dataset, &settings, args),
        Command::Companies(args) => handle_companies(&dataset, args),
        Command::News(args) => handle_news(&dataset, args),
        Command::Stats(args) => handle_stats(&dataset, args),
        Command::Tui(args) => {
            let config = settings.engine_config(args.top, args.delay_ms);
            crate::tui::run(dataset, config, &settings)
        }
    }
}

fn handle_ask(dataset: &Dataset, settings: &Settings, args: AskArgs) -> Result<(), AppError> {
    if args.list {
        print!("{}", format::format_quick_queries());
        return Ok(());
    }

    let query = match args.preset {
        Some(n) => preset_query(n)?.to_string(),
        None => args.query.join(" "),
    };
    let config = settings.engine_config(args.engine.top, args.engine.delay_ms);
    let answer = pipeline::answer_with_delay(dataset, &query, &config);

    if args.json {
        println!("{}", crate::io::to_json(&answer)?);
    } else {
        print!("{}", format::format_answer(&answer));
    }
    Ok(())
}

/// Quick query by 1-based number.
fn preset_query(n: usize) -> Result<&'static str, AppError> {
    n.checked_sub(1)
        .and_then(|i| QUICK_QUERIES.get(i))
        .map(|(_, q)| *q)
        .ok_or_else(|| {
            AppError::new(
                EXIT_USAGE,
                format!("Preset {n} does not exist (1-{}).", QUICK_QUERIES.len()),
            )
        })
}

fn handle_companies(dataset: &Dataset, args: CompaniesArgs) -> Result<(), AppError> {
    let criteria = CompanyFilter {
        search_text: args.search,
        sector: args.sector,
        risk_level: args.risk,
    };
    if !criteria.sector.is_empty() && !dataset.sectors().contains(&criteria.sector) {
        warn!(sector = %criteria.sector, "sector not present in dataset");
    }
    let rows = pipeline::explore(dataset, &criteria);

    if args.json {
        println!("{}", crate::io::to_json(&rows)?);
    } else {
        print!("{}", format::format_company_table(&rows));
    }

    if let Some(path) = &args.export {
        crate::io::write_companies_csv(path, &rows)?;
        debug!(path = %path.display(), rows = rows.len(), "exported companies");
    }
    Ok(())
}

fn handle_news(dataset: &Dataset, args: NewsArgs) -> Result<(), AppError> {
    let articles = pipeline::news_feed(dataset, &args.sector);
    if args.json {
        println!("{}", crate::io::to_json(&articles)?);
    } else {
        print!("{}", format::format_news(&articles));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    header: HeaderStats,
    sectors: Vec<SectorSeriesPoint>,
}

fn handle_stats(dataset: &Dataset, args: StatsArgs) -> Result<(), AppError> {
    let out = StatsOutput {
        header: header_stats(dataset.companies()),
        sectors: sector_series(dataset.companies()),
    };
    if args.json {
        println!("{}", crate::io::to_json(&out)?);
    } else {
        println!("{}\n", format::format_header(&out.header));
        print!("{}", format::format_sector_series(&out.sectors));
    }
    Ok(())
}

/// Install the global `tracing` subscriber.
///
/// Level: `RUST_LOG` if set, else warn/info/debug by `-v` count. While the TUI
/// owns the terminal, logs go to `log_file` or nowhere.
fn init_tracing(verbose: u8, log_file: Option<&Path>, is_tui: bool) -> Result<(), AppError> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let result = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::new(EXIT_USAGE, format!("Failed to open log file '{}': {e}", path.display()))
                })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if is_tui => return Ok(()),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    // A subscriber may already be installed (e.g. by an embedding test harness).
    let _ = result;
    Ok(())
}

/// Rewrite argv so `msme` defaults to `msme tui`.
///
/// Rules (leading `-v`/`--verbose` flags are skipped first and stay put):
/// - `msme`, `msme -v`            -> `msme tui`, `msme -v tui`
/// - `msme --top 3 ...`           -> `msme tui --top 3 ...`
/// - `msme -v --top 3 ...`        -> `msme -v tui --top 3 ...`
/// - `msme --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .position(|a| !is_verbosity_flag(a))
        .map(|i| i + 1);
    let Some(idx) = first else {
        argv.push("tui".to_string());
        return argv;
    };

    let arg = argv[idx].as_str();
    let is_top_level_help_or_version = matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    let is_subcommand = matches!(arg, "ask" | "companies" | "news" | "stats" | "tui");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    // Any other leading flag is treated as a TUI flag.
    if arg.starts_with('-') {
        argv.insert(idx, "tui".to_string());
    }
    argv
}

/// `-v`, `-vv`, ... or `--verbose`.
fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}
