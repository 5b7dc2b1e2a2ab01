//! HTML rendering for the search front-end

use crate::index::SearchResult;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
ol li{margin:.25rem 0}.score{color:#666}";

/// The empty search form served on `GET /`
pub fn search_page() -> String {
    layout("Search", &search_form(""))
}

/// Ranked results for `query`
pub fn results_page(query: &str, results: &[SearchResult]) -> String {
    let mut body = search_form(query);
    body.push_str(&format!(
        "<p>{} result(s) for <strong>{}</strong></p>\n<ol>\n",
        results.len(),
        escape_html(query)
    ));

    for result in results {
        let page = escape_html(&result.page);
        body.push_str(&format!(
            "<li><a href=\"{page}\">{page}</a> <span class=\"score\">({})</span></li>\n",
            result.score
        ));
    }
    body.push_str("</ol>\n");

    layout("Results", &body)
}

/// An error page carrying `message`
pub fn error_page(message: &str) -> String {
    let mut body = search_form("");
    body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(message)));
    layout("Error", &body)
}

fn search_form(query: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"query\" value=\"{}\" autofocus>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n",
        escape_html(query)
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>Word Spider</h1>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// Escapes text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
