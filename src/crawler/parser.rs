//! HTML parser for extracting words and links
//!
//! Each fetched body is parsed once; the same document feeds both the
//! word counter and the link extractor.

use crate::index::{tokenize_document, WordFrequencyTable};
use crate::url::{resolve_href, RequestTarget};
use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Word counts of the page text
    pub words: WordFrequencyTable,

    /// Crawlable links found on the page, in document order
    pub links: Vec<RequestTarget>,
}

/// Parses HTML content and extracts words and links
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is resolved against `base` with [`resolve_href`].
/// Links that fail to resolve (fragment-only, `mailto:`, `javascript:`,
/// `tel:`, data URIs, other schemes) or that have an empty host are dropped.
/// Duplicates are kept; the scheduler decides what to do with them.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base` - The target the content was fetched from
///
/// # Example
///
/// ```
/// use word_spider::crawler::parse_page;
/// use word_spider::url::RequestTarget;
///
/// let html = r#"<html><body><a href="https://example.com/page">Link</a></body></html>"#;
/// let base = RequestTarget::new("example.com", "443", "/");
/// let parsed = parse_page(html, &base);
/// assert_eq!(parsed.words.get("link"), 1);
/// assert_eq!(parsed.links[0].path, "/page");
/// ```
pub fn parse_page(html: &str, base: &RequestTarget) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        words: tokenize_document(&document),
        links: extract_links(&document, base),
    }
}

/// Extracts crawlable links from raw HTML
pub fn extract_links_from_html(html: &str, base: &RequestTarget) -> Vec<RequestTarget> {
    extract_links(&Html::parse_document(html), base)
}

fn extract_links(document: &Html, base: &RequestTarget) -> Vec<RequestTarget> {
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_href(href, base) {
            Ok(target) if !target.host.is_empty() => links.push(target),
            Ok(_) => {}
            Err(e) => tracing::trace!("Dropping link '{}' on {}: {}", href, base, e),
        }
    }

    links
}
