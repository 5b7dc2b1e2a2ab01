use crate::storage::{PageHit, Storage, StorageError};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Largest accepted query, in words
pub const DEFAULT_MAX_QUERY_WORDS: usize = 4;

/// Errors from ranking a query
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query must contain 1-{max} words, got {count}")]
    InvalidQuery { count: usize, max: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One ranked page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The page rendered as a URL
    pub page: String,

    /// Sum of the page's counts over the query words
    pub score: u64,
}

/// Ranks pages for multi-word queries against a [`Storage`] backend
#[derive(Debug, Clone, Copy)]
pub struct SearchRanker {
    max_words: usize,
}

impl Default for SearchRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_WORDS)
    }
}

impl SearchRanker {
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Ranks every page containing at least one query word
    ///
    /// # Arguments
    ///
    /// * `storage` - The index to query
    /// * `words` - Normalized query words, see [`parse_query`]
    ///
    /// # Returns
    ///
    /// Pages ordered by descending score, ties broken by ascending page. Only
    /// pages with a nonzero score appear. An empty list means nothing matched.
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - no words, or more than the configured maximum
    /// * `SearchError::Storage` - the backend failed
    pub fn search<S: Storage + ?Sized>(
        &self,
        storage: &S,
        words: &[String],
    ) -> Result<Vec<SearchResult>, SearchError> {
        if words.is_empty() || words.len() > self.max_words {
            return Err(SearchError::InvalidQuery {
                count: words.len(),
                max: self.max_words,
            });
        }

        let hits = storage.search_words(words)?;
        let results = rank(&hits, words);

        tracing::debug!(
            "Query {:?} matched {} pages",
            words,
            results.len()
        );

        Ok(results)
    }
}

/// Ranks a query with the default word limit
pub fn search<S: Storage + ?Sized>(
    storage: &S,
    words: &[String],
) -> Result<Vec<SearchResult>, SearchError> {
    SearchRanker::default().search(storage, words)
}

/// Sums per-page counts over the query words and orders the pages
///
/// Scores are keyed by [`PageHit::page_id`]. Two stored pages that render to
/// the same URL stay separate results. A word repeated in the query
/// contributes once per occurrence.
pub fn rank(hits: &HashMap<String, Vec<PageHit>>, words: &[String]) -> Vec<SearchResult> {
    let mut scores: HashMap<i64, (&str, u64)> = HashMap::new();

    for word in words {
        let Some(pages) = hits.get(word) else {
            continue;
        };
        for hit in pages {
            let entry = scores.entry(hit.page_id).or_insert((hit.page.as_str(), 0));
            entry.1 += u64::from(hit.count);
        }
    }

    let mut ranked: Vec<(i64, &str, u64)> = scores
        .into_iter()
        .filter(|&(_, (_, score))| score > 0)
        .map(|(id, (page, score))| (id, page, score))
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
        .into_iter()
        .map(|(_, page, score)| SearchResult {
            page: page.to_string(),
            score,
        })
        .collect()
}

/// Descending score, then ascending page, then ascending page id
fn compare_ranked(a: &(i64, &str, u64), b: &(i64, &str, u64)) -> Ordering {
    b.2.cmp(&a.2)
        .then_with(|| a.1.cmp(b.1))
        .then_with(|| a.0.cmp(&b.0))
}

/// Splits raw query text into normalized words
///
/// Splits on whitespace, strips ASCII punctuation from each word, lowercases,
/// and drops words left empty.
///
/// # Example
///
/// ```
/// use word_spider::index::parse_query;
///
/// assert_eq!(parse_query("  Rust,  CRABS! "), vec!["rust", "crabs"]);
/// ```
pub fn parse_query(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
