//! Storage module for the word index
//!
//! This module handles all database operations for the spider, including:
//! - SQLite database initialization and schema management
//! - Atomic per-page writes of word counts
//! - Word lookups for the search ranker
//! - Index statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{PageHit, Storage, StorageError, StorageResult};

use std::path::Path;
use std::sync::{Arc, Mutex};

/// Longest word, in characters, that is written to the index
pub const MAX_WORD_LEN: usize = 45;

/// Storage handle shared between crawl workers and the search front-end
pub type SharedStorage = Arc<Mutex<dyn Storage + Send>>;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Wraps a backend for sharing across tasks
pub fn shared<S: Storage + Send + 'static>(storage: S) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}
