//! Storage traits and error types
//!
//! This module defines the trait interface for index backends and
//! associated error types.

use crate::index::WordFrequencyTable;
use crate::url::RequestTarget;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to open database at {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage task failed: {0}")]
    Background(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One page's count for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHit {
    /// Row id of the page, its identity within the index
    pub page_id: i64,

    /// The page rendered as a URL, for display only
    pub page: String,

    /// Occurrences of the word on that page
    pub count: u32,
}

/// Trait for index backend implementations
///
/// The index holds three relations: pages, words, and the `(page, word, count)`
/// postings joining them. A `(page, word)` pair is stored at most once.
pub trait Storage {
    /// Creates the tables if they do not exist yet
    fn create_schema(&mut self) -> StorageResult<()>;

    /// Removes every page, word and posting
    fn clear(&mut self) -> StorageResult<()>;

    /// Persists one page's word counts atomically
    ///
    /// The page row is created if missing. Words longer than
    /// [`MAX_WORD_LEN`](crate::storage::MAX_WORD_LEN) characters are skipped.
    /// Postings that already exist are left untouched.
    ///
    /// # Arguments
    ///
    /// * `page` - The fetched target the words came from
    /// * `words` - Word counts for that page
    ///
    /// # Returns
    ///
    /// The number of postings newly stored
    fn write_document(
        &mut self,
        page: &RequestTarget,
        words: &WordFrequencyTable,
    ) -> StorageResult<usize>;

    /// Looks up every page containing each word
    ///
    /// Words with no postings map to an empty list.
    fn search_words(&self, words: &[String]) -> StorageResult<HashMap<String, Vec<PageHit>>>;

    // ===== Statistics =====

    /// Counts indexed pages
    fn count_pages(&self) -> StorageResult<u64>;

    /// Counts distinct words
    fn count_words(&self) -> StorageResult<u64>;

    /// Counts page/word postings
    fn count_postings(&self) -> StorageResult<u64>;
}
