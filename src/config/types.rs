use crate::url::RequestTarget;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Word-Spider
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub spider: SpiderConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Seed target and crawl shape
#[derive(Debug, Clone, Deserialize)]
pub struct SpiderConfig {
    /// Seed host
    pub host: String,

    /// Seed port; "443" selects HTTPS
    #[serde(default = "default_seed_port")]
    pub port: String,

    /// Seed path
    #[serde(default = "default_seed_target")]
    pub target: String,

    /// Deepest level to fetch; the seed is level 1
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Worker pool size, 0 for available parallelism
    #[serde(default)]
    pub threads: usize,

    /// Skip targets that were already queued during this crawl
    #[serde(default, rename = "dedupe-targets")]
    pub dedupe_targets: bool,
}

impl SpiderConfig {
    /// The seed as a request target
    pub fn seed(&self) -> RequestTarget {
        RequestTarget::new(self.host.clone(), self.port.clone(), self.target.clone())
    }

    /// Number of workers to spawn
    pub fn worker_count(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Deadline for TCP connect plus TLS handshake
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Deadline for a whole request
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Attempts allowed per logical fetch, redirects included
    #[serde(rename = "max-redirects")]
    pub max_redirects: u32,

    /// Host patterns never fetched over HTTPS (e.g. "*.youtube.com")
    #[serde(rename = "blacklisted-hosts")]
    pub blacklisted_hosts: Vec<String>,
}

impl FetcherConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("word-spider/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            max_redirects: 5,
            blacklisted_hosts: [
                "*.youtube.com",
                "*.googlevideo.com",
                "*.rutube.ru",
                "*.vkvideo.ru",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Index database location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Clear the index before crawling
    #[serde(rename = "clear-on-start")]
    pub clear_on_start: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./word-spider.db".to_string(),
            clear_on_start: true,
        }
    }
}

/// Search front-end
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,

    /// Largest accepted query, in words
    #[serde(rename = "max-query-words")]
    pub max_query_words: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            max_query_words: crate::index::DEFAULT_MAX_QUERY_WORDS,
        }
    }
}

fn default_seed_port() -> String {
    crate::url::HTTPS_PORT.to_string()
}

fn default_seed_target() -> String {
    "/".to_string()
}
