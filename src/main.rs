//! Threadline main entry point
//!
//! This is the command-line interface for the Threadline forum scraper.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use threadline::config::{load_config_or_default, validate_forum_id, DEFAULT_FORUM_ID};
use threadline::crawler::run_scrape;
use threadline::output::print_summary;
use tracing_subscriber::EnvFilter;

/// Threadline: scrape forum threads across multiple pages
///
/// Walks the forum's threaded listing from the newest page backward,
/// fetches every post body once, and writes all posts to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "threadline")]
#[command(version)]
#[command(about = "Scrape forum posts across multiple pages", long_about = None)]
struct Cli {
    /// Forum ID to scrape (5178 is the Android forum)
    #[arg(long, default_value = DEFAULT_FORUM_ID, value_parser = parse_forum_id)]
    forum: String,

    /// Number of listing pages to scrape
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    let summary = run_scrape(config, &cli.forum, cli.pages)
        .await
        .context("scrape failed")?;

    if !cli.quiet {
        print_summary(&summary);
    }
    tracing::info!("Scraping completed!");

    Ok(())
}

/// Rejects forum ids that are unsafe in a URL query or file name
fn parse_forum_id(value: &str) -> Result<String, String> {
    validate_forum_id(value)
        .map(|()| value.to_string())
        .map_err(|e| e.to_string())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("threadline=info,warn"),
            1 => EnvFilter::new("threadline=debug,info"),
            2 => EnvFilter::new("threadline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
