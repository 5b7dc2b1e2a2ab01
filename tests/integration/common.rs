#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use axum::Router;
use word_spider::config::FetcherConfig;
use word_spider::crawler::{PageFetcher, Spider};
use word_spider::index::WordFrequencyTable;
use word_spider::server::{router, AppState};
use word_spider::storage::{shared, SharedStorage, SqliteStorage, Storage};
use word_spider::url::RequestTarget;
use wiremock::MockServer;

pub const TEST_USER_AGENT: &str = "TestSpider/1.0";

/// Fetcher settings with short deadlines and no blacklist
pub fn test_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        connect_timeout_secs: 2,
        request_timeout_secs: 5,
        max_redirects: 5,
        blacklisted_hosts: Vec::new(),
    }
}

pub fn test_fetcher() -> PageFetcher {
    PageFetcher::new(&test_fetcher_config()).expect("Failed to build fetcher")
}

pub fn memory_storage() -> SharedStorage {
    shared(SqliteStorage::new_in_memory().expect("Failed to open in-memory storage"))
}

/// A spider with four workers writing into `storage`
pub fn test_spider(storage: &SharedStorage) -> Spider {
    Spider::new(test_fetcher(), Arc::clone(storage)).with_workers(4)
}

/// The target for `path` on the mock server
pub fn mock_target(server: &MockServer, path: &str) -> RequestTarget {
    let address = server.address();
    RequestTarget::new(address.ip().to_string(), address.port().to_string(), path)
}

/// Absolute URL of `path` on the mock server
pub fn mock_url(server: &MockServer, path: &str) -> String {
    format!("{}{}", server.uri(), path)
}

/// A port on localhost with nothing listening
pub fn dead_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    port
}

/// Minimal HTML document with `text` followed by one anchor per href
pub fn html_page(text: &str, hrefs: &[String]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html><head><title>Test</title></head>\n<body>\n<p>{}</p>\n{}</body></html>",
        text, links
    )
}

/// Storage holding two pages: a.test (foo 3) and b.test (foo 5, bar 2)
pub fn ranked_storage() -> SharedStorage {
    let mut storage = SqliteStorage::new_in_memory().expect("Failed to open in-memory storage");

    let a: WordFrequencyTable = [("foo", 3)].into_iter().collect();
    let b: WordFrequencyTable = [("foo", 5), ("bar", 2)].into_iter().collect();

    storage
        .write_document(&RequestTarget::new("a.test", "80", "/"), &a)
        .expect("Failed to write a.test");
    storage
        .write_document(&RequestTarget::new("b.test", "80", "/"), &b)
        .expect("Failed to write b.test");

    shared(storage)
}

/// The front-end router over `storage`, with the default four-word limit
pub fn test_router(storage: SharedStorage) -> Router {
    router(Arc::new(AppState::new(storage, 4)))
}
