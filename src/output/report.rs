//! Console rendering of crawl reports and search results

use crate::crawler::CrawlReport;
use crate::index::SearchResult;

/// Prints a finished crawl's report to stdout
pub fn print_crawl_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!("  Pages fetched: {}", report.processed);
    println!("  Fetches failed: {}", report.failed);
    println!("  Postings stored: {}", report.stored_words);
    println!("  Deepest level: {}", report.deepest);
}

/// Formats ranked results, one `score  page` line each
pub fn format_search_results(results: &[SearchResult]) -> String {
    let width = results
        .iter()
        .map(|r| r.score.to_string().len())
        .max()
        .unwrap_or(1);

    results
        .iter()
        .map(|r| format!("{:>width$}  {}", r.score, r.page, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints ranked results to stdout
pub fn print_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("Not found");
    } else {
        println!("{}", format_search_results(results));
    }
}
