//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with manual redirect handling
//! - HTML parsing into word counts and links
//! - The shared task queue and its termination condition
//! - Overall crawl coordination by a worker pool

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, CrawlReport, Spider};
pub use fetcher::{build_http_client, FetchError, PageFetcher};
pub use parser::{extract_links_from_html, parse_page, ParsedPage};
pub use scheduler::{CrawlTask, Scheduler};

use crate::config::Config;
use crate::storage::SharedStorage;
use crate::SpiderError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the queue with the configured start target
/// 3. Fetch pages, count their words and follow their links
/// 4. Write every page's counts to storage
///
/// # Arguments
///
/// * `config` - The spider configuration
/// * `storage` - The index to write to, with its schema already in place
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(SpiderError)` - Crawl could not start
pub async fn crawl(config: &Config, storage: SharedStorage) -> Result<CrawlReport, SpiderError> {
    run_crawl(config, storage).await
}
