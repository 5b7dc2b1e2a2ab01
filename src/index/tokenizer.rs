use scraper::Html;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Per-document word counts
///
/// Keys are lowercase and contain no ASCII punctuation or whitespace. Counts are
/// always at least 1. Iteration is in lexicographic word order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: BTreeMap<String, u32>,
}

impl WordFrequencyTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `word`
    pub fn record(&mut self, word: &str) {
        self.insert(word, 1);
    }

    /// Adds `count` occurrences of `word`; zero counts are ignored
    pub fn insert(&mut self, word: impl Into<String>, count: u32) {
        if count == 0 {
            return;
        }
        *self.counts.entry(word.into()).or_insert(0) += count;
    }

    /// Count for one word, zero when absent
    pub fn get(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// Renders the table back into text, each word repeated `count` times
    ///
    /// Tokenizing the result reproduces the same table.
    pub fn to_text(&self) -> String {
        let mut words = Vec::new();
        for (word, count) in self.iter() {
            for _ in 0..count {
                words.push(word);
            }
        }
        words.join(" ")
    }
}

impl<'a> IntoIterator for &'a WordFrequencyTable {
    type Item = (&'a String, &'a u32);
    type IntoIter = btree_map::Iter<'a, String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for WordFrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (word, count) in iter {
            table.insert(word, count);
        }
        table
    }
}

/// Parses an HTML document and counts its words
///
/// Never fails: malformed or empty markup yields whatever text the lenient
/// parser recovers, possibly an empty table.
///
/// # Example
///
/// ```
/// use word_spider::index::tokenize;
///
/// let table = tokenize("<p>Hello, world! Hello.</p>");
/// assert_eq!(table.get("hello"), 2);
/// assert_eq!(table.get("world"), 1);
/// ```
pub fn tokenize(html: &str) -> WordFrequencyTable {
    let document = Html::parse_document(html);
    tokenize_document(&document)
}

/// Counts the words of an already parsed document
pub fn tokenize_document(document: &Html) -> WordFrequencyTable {
    count_words(&document_text(document))
}

/// Text content of the document root, text nodes concatenated without separators
pub fn document_text(document: &Html) -> String {
    document.root_element().text().collect()
}

/// Replaces ASCII punctuation with spaces and lowercases the result
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Normalizes `text` and counts its whitespace-separated words
pub fn count_words(text: &str) -> WordFrequencyTable {
    let mut table = WordFrequencyTable::new();

    for word in normalize_text(text).split_whitespace() {
        if word.is_empty() || word == "\"" {
            continue;
        }
        table.record(word);
    }

    table
}
