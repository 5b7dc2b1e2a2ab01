use crate::url::{RequestTarget, HTTPS_PORT, HTTP_PORT};
use crate::{UrlError, UrlResult};

/// Parses an absolute `scheme://host[:port]/path` URL into a request target
///
/// # Parsing Steps
///
/// 1. Split on `"://"`; the left side is the scheme
/// 2. The authority ends at the first `/` (or `?`) after the scheme
/// 3. Split the authority into host and port on the last `:`
/// 4. Without an explicit port, use 443 for `https` and 80 for anything else
/// 5. A missing path becomes `/`
///
/// # Errors
///
/// * `UrlError::Empty` - the input is empty
/// * `UrlError::MissingScheme` - the input has no `"://"`
/// * `UrlError::MissingHost` - the host part is empty
///
/// # Examples
///
/// ```
/// use word_spider::url::resolve_absolute;
///
/// let target = resolve_absolute("https://example.com/docs").unwrap();
/// assert_eq!(target.host, "example.com");
/// assert_eq!(target.port, "443");
/// assert_eq!(target.path, "/docs");
///
/// let target = resolve_absolute("http://example.com:8080").unwrap();
/// assert_eq!(target.port, "8080");
/// assert_eq!(target.path, "/");
/// ```
pub fn resolve_absolute(url: &str) -> UrlResult<RequestTarget> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| UrlError::MissingScheme(url.to_string()))?;

    let authority_end = rest
        .find(|c| matches!(c, '/' | '?'))
        .unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let (host, port) = split_host_port(authority);
    let port = match port {
        Some(port) if !port.is_empty() => port.to_string(),
        _ => default_port(scheme).to_string(),
    };

    if host.is_empty() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    let path = if tail.is_empty() {
        "/".to_string()
    } else if tail.starts_with('/') {
        tail.to_string()
    } else {
        format!("/{}", tail)
    };

    Ok(RequestTarget::new(host, port, path))
}

/// Splits `host:port` on the last colon; bracketed IPv6 hosts keep their colons
fn split_host_port(authority: &str) -> (&str, Option<&str>) {
    if authority.ends_with(']') {
        return (authority, None);
    }

    match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    }
}

fn default_port(scheme: &str) -> &'static str {
    if scheme.eq_ignore_ascii_case("https") {
        HTTPS_PORT
    } else {
        HTTP_PORT
    }
}
