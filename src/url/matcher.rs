/// Checks if a host matches a blacklist pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact match: `"youtube.com"` matches only `"youtube.com"`
/// 2. Wildcard match: `"*.youtube.com"` matches the bare domain and every
///    subdomain (`"www.youtube.com"`, `"m.youtube.com"`, ...)
///
/// Comparison ignores ASCII case, since host names are case-insensitive.
///
/// # Examples
///
/// ```
/// use word_spider::url::host_matches;
///
/// assert!(host_matches("youtube.com", "YouTube.com"));
/// assert!(!host_matches("youtube.com", "www.youtube.com"));
///
/// assert!(host_matches("*.youtube.com", "youtube.com"));
/// assert!(host_matches("*.youtube.com", "www.youtube.com"));
/// assert!(!host_matches("*.youtube.com", "notyoutube.com"));
/// ```
pub fn host_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    if let Some(base) = pattern.strip_prefix("*.") {
        host == base || host.ends_with(&format!(".{}", base))
    } else {
        host == pattern
    }
}
