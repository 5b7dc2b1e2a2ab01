//! Output module for console reports
//!
//! This module handles:
//! - Index statistics loaded from storage
//! - Crawl reports printed after a crawl
//! - Ranked search results for the command line

mod report;
pub mod stats;

pub use report::{format_search_results, print_crawl_report, print_search_results};
pub use stats::{load_statistics, print_statistics, IndexStatistics};
