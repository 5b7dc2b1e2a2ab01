//! Statistics generation from the index database
//!
//! This module provides functionality for extracting and displaying
//! index statistics from the storage layer.

use crate::storage::{Storage, StorageResult};

/// Index statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of indexed pages
    pub pages: u64,

    /// Number of distinct words
    pub words: u64,

    /// Number of page/word postings
    pub postings: u64,
}

impl IndexStatistics {
    /// Mean number of distinct words per page
    pub fn words_per_page(&self) -> f64 {
        if self.pages == 0 {
            0.0
        } else {
            self.postings as f64 / self.pages as f64
        }
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(IndexStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics<S: Storage + ?Sized>(storage: &S) -> StorageResult<IndexStatistics> {
    Ok(IndexStatistics {
        pages: storage.count_pages()?,
        words: storage.count_words()?,
        postings: storage.count_postings()?,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Pages indexed: {}", stats.pages);
    println!("  Distinct words: {}", stats.words);
    println!("  Postings: {}", stats.postings);
    println!("  Distinct words per page: {:.1}", stats.words_per_page());
}
