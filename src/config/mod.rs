//! Configuration module for Word-Spider
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use word_spider::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spider.toml")).unwrap();
//! println!("Spider will use max depth: {}", config.spider.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DatabaseConfig, FetcherConfig, ServerConfig, SpiderConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
