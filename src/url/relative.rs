use crate::url::RequestTarget;
use crate::{UrlError, UrlResult};

/// Resolves a scheme-less reference against the target it was found on
///
/// This is a simplified resolver, not the RFC 3986 algorithm. Rules, in order:
///
/// 1. `#...` is fragment-only and rejected
/// 2. `./rest` becomes the path `rest` (literal prefix stripping, no merging)
/// 3. anything containing `..` climbs one directory per leading `../`
///    from the source's directory, clamping at `/`, then appends the remainder
/// 4. anything else is appended to the source path, with its query removed,
///    inserting `/` only when neither side supplies one
///
/// The result always keeps the source host and port.
///
/// # Examples
///
/// ```
/// use word_spider::url::{resolve_relative, RequestTarget};
///
/// let source = RequestTarget::new("example.com", "443", "/x/y/z");
/// assert_eq!(resolve_relative("../a/b", &source).unwrap().path, "/x/a/b");
/// assert_eq!(resolve_relative("./c", &source).unwrap().path, "c");
/// ```
pub fn resolve_relative(url: &str, source: &RequestTarget) -> UrlResult<RequestTarget> {
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    if url.starts_with('#') {
        return Err(UrlError::FragmentOnly);
    }

    let base = strip_query(&source.path);

    let path = if let Some(rest) = url.strip_prefix("./") {
        rest.to_string()
    } else if url.contains("..") {
        climb(url, base)
    } else {
        append(base, url)
    };

    Ok(RequestTarget::new(
        source.host.clone(),
        source.port.clone(),
        path,
    ))
}

fn strip_query(path: &str) -> &str {
    match path.find(|c| matches!(c, '?' | '#')) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn climb(url: &str, base: &str) -> String {
    let mut rest = url;
    let mut levels = 0usize;

    while let Some(stripped) = rest.strip_prefix("../") {
        levels += 1;
        rest = stripped;
    }
    if rest == ".." {
        levels += 1;
        rest = "";
    }

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    // last segment names the current document
    if !base.ends_with('/') {
        segments.pop();
    }

    for _ in 0..levels {
        if segments.pop().is_none() {
            break;
        }
    }

    let mut path = String::from("/");
    for segment in segments {
        path.push_str(segment);
        path.push('/');
    }
    path.push_str(rest);
    path
}

fn append(base: &str, url: &str) -> String {
    match (base.ends_with('/'), url.starts_with('/')) {
        (false, false) => format!("{}/{}", base, url),
        (true, true) => format!("{}{}", base, &url[1..]),
        _ => format!("{}{}", base, url),
    }
}
