//! URL handling for the spider
//!
//! This module turns URL strings into [`RequestTarget`]s, the `{host, port, path}`
//! triple the fetcher dispatches on. It provides:
//! - Absolute URL parsing (`scheme://host[:port]/path`)
//! - Simplified relative reference resolution against a source target
//! - Href dispatch used for both anchor links and redirect `Location` headers
//! - Wildcard host matching for the fetcher blacklist
//!
//! The resolver is simpler than RFC 3986; see [`resolve_relative`].

mod absolute;
mod matcher;
mod relative;

use crate::{UrlError, UrlResult};
use std::fmt;

pub use absolute::resolve_absolute;
pub use matcher::host_matches;
pub use relative::resolve_relative;

/// Port that selects HTTPS; every other port is fetched over plain HTTP
pub const HTTPS_PORT: &str = "443";

/// Default port for non-HTTPS schemes
pub const HTTP_PORT: &str = "80";

/// Schemes that produce crawlable targets
const CRAWLABLE_SCHEMES: &[&str] = &["http", "https"];

/// One fetchable resource
///
/// Ports are kept as strings. The rule `port == "443"` ⇒ HTTPS is load-bearing:
/// the original scheme is not retained once a target has been built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTarget {
    /// Host name or address, without port
    pub host: String,

    /// Port as written in the URL, or the scheme default
    pub port: String,

    /// Request path, including any query string
    pub path: String,
}

impl RequestTarget {
    /// Creates a new request target
    pub fn new(host: impl Into<String>, port: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            path: path.into(),
        }
    }

    /// Returns true if this target is fetched over TLS
    pub fn is_https(&self) -> bool {
        self.port == HTTPS_PORT
    }

    /// The scheme implied by the port
    pub fn scheme(&self) -> &'static str {
        if self.is_https() {
            "https"
        } else {
            "http"
        }
    }

    /// Path as sent on the request line (always starts with `/`)
    pub fn request_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }
}

impl fmt::Display for RequestTarget {
    /// Renders the target as a URL; default ports are omitted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_port = if self.is_https() { HTTPS_PORT } else { HTTP_PORT };
        if self.port == default_port {
            write!(f, "{}://{}{}", self.scheme(), self.host, self.request_path())
        } else {
            write!(
                f,
                "{}://{}:{}{}",
                self.scheme(),
                self.host,
                self.port,
                self.request_path()
            )
        }
    }
}

/// Resolves an href or `Location` value against the target it was found on
///
/// Dispatch rules:
/// - empty input and fragment-only references (`#top`) are rejected
/// - a trailing `#fragment` is dropped, it is never sent to a server
/// - anything containing `://` is parsed with [`resolve_absolute`]
/// - `//host/path` inherits the scheme implied by the source port
/// - other schemes (`mailto:`, `javascript:`, ...) are rejected
/// - everything else goes through [`resolve_relative`]
///
/// # Examples
///
/// ```
/// use word_spider::url::{resolve_href, RequestTarget};
///
/// let source = RequestTarget::new("example.com", "443", "/docs/index.html");
/// let target = resolve_href("https://other.org/a", &source).unwrap();
/// assert_eq!(target, RequestTarget::new("other.org", "443", "/a"));
///
/// let target = resolve_href("page.html", &source).unwrap();
/// assert_eq!(target.path, "/docs/index.html/page.html");
/// ```
pub fn resolve_href(href: &str, source: &RequestTarget) -> UrlResult<RequestTarget> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    if href.starts_with('#') {
        return Err(UrlError::FragmentOnly);
    }

    let href = match href.find('#') {
        Some(idx) => &href[..idx],
        None => href,
    };

    if let Some((scheme, _)) = href.split_once("://") {
        if !is_crawlable_scheme(scheme) {
            return Err(UrlError::UnsupportedScheme(scheme.to_string()));
        }
        return resolve_absolute(href);
    }

    if let Some(rest) = href.strip_prefix("//") {
        return resolve_absolute(&format!("{}://{}", source.scheme(), rest));
    }

    if let Some(scheme) = leading_scheme(href) {
        return Err(UrlError::UnsupportedScheme(scheme.to_string()));
    }

    resolve_relative(href, source)
}

fn is_crawlable_scheme(scheme: &str) -> bool {
    CRAWLABLE_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
}

/// Returns the scheme of an opaque URI such as `mailto:x@y.z`
fn leading_scheme(href: &str) -> Option<&str> {
    let (scheme, _) = href.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;

    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(scheme)
    } else {
        None
    }
}
