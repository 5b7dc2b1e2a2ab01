//! Word-Spider: a depth-bounded web crawler and word-frequency search index
//!
//! This crate crawls pages breadth-first from a seed target, counts the words on
//! every fetched page, persists the counts, and ranks pages for multi-word queries
//! by the sum of their per-word counts.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod server;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Word-Spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Search error: {0}")]
    Search(#[from] index::SearchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid host pattern in config: {0}")]
    InvalidPattern(String),

    #[error("Invalid address in config: {0}")]
    InvalidAddress(String),
}

/// URL-specific errors
///
/// Every variant means "not a crawlable link": the caller discards the link.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("No scheme in URL: {0}")]
    MissingScheme(String),

    #[error("Empty host in URL: {0}")]
    MissingHost(String),

    #[error("Fragment-only reference")]
    FragmentOnly,

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for Word-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, PageFetcher, Spider};
pub use index::{search, tokenize, SearchResult, WordFrequencyTable};
pub use storage::{SharedStorage, SqliteStorage, Storage};
pub use url::{resolve_absolute, resolve_href, resolve_relative, RequestTarget};
