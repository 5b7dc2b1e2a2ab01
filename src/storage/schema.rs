//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the word index.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Every fetched page, identified by its request target
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    host TEXT NOT NULL,
    port TEXT NOT NULL,
    target TEXT NOT NULL,
    indexed_at TEXT NOT NULL,
    UNIQUE(host, port, target)
);

-- Distinct normalized words
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE
);

-- Word counts per page
CREATE TABLE IF NOT EXISTS page_words (
    page_id INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
    word_id INTEGER NOT NULL REFERENCES words(id) ON DELETE CASCADE,
    count INTEGER NOT NULL,
    UNIQUE(page_id, word_id)
);

CREATE INDEX IF NOT EXISTS idx_page_words_word ON page_words(word_id);
"#;

/// SQL removing all indexed data, parents last
pub const CLEAR_SQL: &str = r#"
DELETE FROM page_words;
DELETE FROM pages;
DELETE FROM words;
DELETE FROM sqlite_sequence WHERE name IN ('pages', 'words');
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
