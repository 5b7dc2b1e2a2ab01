//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the spider, including:
//! - Building one shared HTTP client with the configured user agent and deadlines
//! - GET requests over HTTP or HTTPS, selected by the target port
//! - Manual redirect following under a per-fetch attempt budget
//! - Error classification (timeout vs. any other failure)
//!
//! Non-redirect responses are returned as-is whatever their status; a 404 page
//! is still a page.

use crate::config::FetcherConfig;
use crate::url::{host_matches, resolve_href, RequestTarget};
use crate::UrlError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, LOCATION};
use reqwest::{redirect::Policy, tls, Client, StatusCode};
use thiserror::Error;

/// Errors from fetching one target
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Too many redirects while fetching {target}")]
    TooManyRedirects { target: String },

    #[error("Timed out talking to {host}")]
    Timeout { host: String },

    #[error("Request to {host} failed: {source}")]
    Failed {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unusable redirect location '{location}': {source}")]
    InvalidRedirect {
        location: String,
        #[source]
        source: UrlError,
    },
}

/// Outcome of a single request, before redirect handling
enum Response {
    Redirect(String),
    Body(String),
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are disabled so the fetcher can follow them under its own budget.
/// Idle connections are not pooled; every request opens a fresh connection.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```
/// use word_spider::config::FetcherConfig;
/// use word_spider::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .redirect(Policy::none()) // Handle redirects manually
        .min_tls_version(tls::Version::TLS_1_2)
        .pool_max_idle_per_host(0)
        .build()
}

/// Fetches page bodies for the spider
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    max_redirects: u32,
    blacklisted_hosts: Vec<String>,
}

impl PageFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            max_redirects: config.max_redirects,
            blacklisted_hosts: config.blacklisted_hosts.clone(),
        })
    }

    /// Returns true if `host` matches any blacklist pattern
    pub fn is_blacklisted(&self, host: &str) -> bool {
        self.blacklisted_hosts
            .iter()
            .any(|pattern| host_matches(pattern, host))
    }

    /// Fetches a target with the configured redirect budget
    pub async fn fetch(&self, target: &RequestTarget) -> Result<String, FetchError> {
        self.fetch_with_budget(target, i64::from(self.max_redirects))
            .await
    }

    /// Fetches a target, following redirects while the budget lasts
    ///
    /// # Request Flow
    ///
    /// 1. Fail with `TooManyRedirects` if the budget is exhausted
    /// 2. Blacklisted hosts reached over HTTPS yield an empty body
    /// 3. Send GET; on 301/302/303/307/308 with a `Location` header, resolve
    ///    the location against the current target, spend one unit, repeat
    /// 4. Otherwise return the body, whatever the status
    ///
    /// A budget of `n` allows at most `n` requests.
    ///
    /// # Arguments
    ///
    /// * `target` - The target to fetch
    /// * `redirect_budget` - Requests allowed for this logical fetch
    pub async fn fetch_with_budget(
        &self,
        target: &RequestTarget,
        redirect_budget: i64,
    ) -> Result<String, FetchError> {
        let mut current = target.clone();
        let mut budget = redirect_budget;

        loop {
            if budget <= 0 {
                return Err(FetchError::TooManyRedirects {
                    target: target.to_string(),
                });
            }

            if current.is_https() && self.is_blacklisted(&current.host) {
                tracing::debug!("Skipping blacklisted host {}", current.host);
                return Ok(String::new());
            }

            match self.request(&current).await? {
                Response::Body(body) => return Ok(body),
                Response::Redirect(location) => {
                    let next = resolve_href(&location, &current).map_err(|source| {
                        FetchError::InvalidRedirect {
                            location: location.clone(),
                            source,
                        }
                    })?;

                    tracing::debug!("Redirect {} -> {}", current, next);
                    current = next;
                    budget -= 1;
                }
            }
        }
    }

    async fn request(&self, target: &RequestTarget) -> Result<Response, FetchError> {
        let url = target.to_string();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_error(&target.host, e))?;

        let status = response.status();
        if is_redirect(status) {
            if let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
            {
                return Ok(Response::Redirect(location.to_string()));
            }
        }

        tracing::trace!("GET {} -> {}", url, status);

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(&target.host, e))?;

        Ok(Response::Body(body))
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

fn classify_error(host: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            host: host.to_string(),
        }
    } else {
        FetchError::Failed {
            host: host.to_string(),
            source: error,
        }
    }
}
