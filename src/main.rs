//! Word-Spider main entry point
//!
//! This is the command-line interface for crawling, searching and serving the
//! word index.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use word_spider::config::{load_config, Config};
use word_spider::crawler::crawl;
use word_spider::index::{parse_query, SearchRanker};
use word_spider::output::{
    load_statistics, print_crawl_report, print_search_results, print_statistics,
};
use word_spider::server::serve;
use word_spider::storage::{open_storage, shared, Storage};

/// Word-Spider: a depth-bounded crawler and word-frequency search index
///
/// Word-Spider crawls pages breadth-first from a seed, counts the words on
/// each page, and ranks pages for short queries by summed word counts.
#[derive(Parser, Debug)]
#[command(name = "word-spider")]
#[command(version)]
#[command(about = "A depth-bounded crawler and word-frequency search index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl from the configured seed and index every page
    Crawl {
        /// Keep the existing index instead of clearing it first
        #[arg(long)]
        keep: bool,
    },

    /// Rank indexed pages for the given words
    Search {
        /// Query words
        #[arg(required = true, value_name = "WORDS")]
        words: Vec<String>,
    },

    /// Run the HTML search front-end
    Serve,

    /// Show statistics from the index and exit
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;

    match cli.command {
        Command::Crawl { keep } => handle_crawl(&config, keep).await,
        Command::Search { words } => handle_search(&config, &words),
        Command::Serve => handle_serve(&config).await,
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_spider=info,warn"),
            1 => EnvFilter::new("word_spider=debug,info"),
            2 => EnvFilter::new("word_spider=trace,debug"),
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

/// Handles `crawl`: prepares the index, runs the spider, prints a report
async fn handle_crawl(config: &Config, keep: bool) -> anyhow::Result<()> {
    let mut storage = open_storage(Path::new(&config.database.path))
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    storage.create_schema()?;
    if config.database.clear_on_start && !keep {
        storage.clear()?;
    } else {
        tracing::info!("Keeping existing index");
    }

    tracing::info!(
        "Seed: {}, max depth: {}, blacklisted hosts: {}",
        config.spider.seed(),
        config.spider.max_depth,
        config.fetcher.blacklisted_hosts.len()
    );

    let report = crawl(config, shared(storage)).await?;
    print_crawl_report(&report);

    Ok(())
}

/// Handles `search`: ranks the query against the index
fn handle_search(config: &Config, words: &[String]) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.database.path))
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    let query = parse_query(&words.join(" "));
    let ranker = SearchRanker::new(config.server.max_query_words);
    let results = ranker.search(&storage, &query)?;

    print_search_results(&results);
    Ok(())
}

/// Handles `serve`: runs the front-end until interrupted
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.database.path))
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    serve(&config.server, shared(storage)).await?;
    Ok(())
}

/// Handles `stats`: shows statistics from the index
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.database.path);

    let storage = open_storage(Path::new(&config.database.path))
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}
