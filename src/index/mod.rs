//! Word indexing and search
//!
//! - `tokenizer`: HTML to normalized words, counted per document
//! - `ranker`: multi-word queries ranked by summed per-page counts

mod ranker;
mod tokenizer;

pub use ranker::{
    parse_query, rank, search, SearchError, SearchRanker, SearchResult, DEFAULT_MAX_QUERY_WORDS,
};
pub use tokenizer::{
    count_words, document_text, normalize_text, tokenize, tokenize_document, WordFrequencyTable,
};
