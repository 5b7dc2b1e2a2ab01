//! Integration tests for Word-Spider
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher, the full crawl cycle and the search front-end end-to-end.

mod common;
mod fetch_tests;
mod search_tests;
