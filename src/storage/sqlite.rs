//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::index::WordFrequencyTable;
use crate::storage::schema::{initialize_schema, CLEAR_SQL};
use crate::storage::traits::{PageHit, Storage, StorageError, StorageResult};
use crate::storage::MAX_WORD_LEN;
use crate::url::RequestTarget;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database file and ensures the schema exists
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError::Connect)` - The file could not be opened
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::Connect {
            path: path.display().to_string(),
            source,
        })?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn count(&self, table: &str) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }
}

impl Storage for SqliteStorage {
    fn create_schema(&mut self) -> StorageResult<()> {
        initialize_schema(&self.conn)?;
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn.execute_batch(CLEAR_SQL)?;
        tracing::info!("Cleared word index");
        Ok(())
    }

    fn write_document(
        &mut self,
        page: &RequestTarget,
        words: &WordFrequencyTable,
    ) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        tx.execute(
            "INSERT OR IGNORE INTO pages (host, port, target, indexed_at) VALUES (?1, ?2, ?3, ?4)",
            params![page.host, page.port, page.path, now],
        )?;

        let page_id: i64 = tx.query_row(
            "SELECT id FROM pages WHERE host = ?1 AND port = ?2 AND target = ?3",
            params![page.host, page.port, page.path],
            |row| row.get(0),
        )?;

        let mut stored = 0;
        {
            let mut insert_word = tx.prepare_cached("INSERT OR IGNORE INTO words (word) VALUES (?1)")?;
            let mut select_word = tx.prepare_cached("SELECT id FROM words WHERE word = ?1")?;
            let mut insert_posting = tx.prepare_cached(
                "INSERT INTO page_words (page_id, word_id, count) VALUES (?1, ?2, ?3)
                 ON CONFLICT(page_id, word_id) DO NOTHING",
            )?;

            for (word, count) in words.iter() {
                if word.chars().count() > MAX_WORD_LEN {
                    tracing::trace!("Skipping oversized word on {}", page);
                    continue;
                }

                insert_word.execute(params![word])?;
                let word_id: i64 = select_word.query_row(params![word], |row| row.get(0))?;
                stored += insert_posting.execute(params![page_id, word_id, count])?;
            }
        }

        tx.commit()?;
        Ok(stored)
    }

    fn search_words(&self, words: &[String]) -> StorageResult<HashMap<String, Vec<PageHit>>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT p.id, p.host, p.port, p.target, pw.count
             FROM page_words pw
             JOIN words w ON w.id = pw.word_id
             JOIN pages p ON p.id = pw.page_id
             WHERE w.word = ?1
             ORDER BY p.id",
        )?;

        let mut results = HashMap::new();
        for word in words {
            if results.contains_key(word) {
                continue;
            }

            let hits = stmt
                .query_map(params![word], |row| {
                    let target = RequestTarget::new(
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    );
                    Ok(PageHit {
                        page_id: row.get(0)?,
                        page: target.to_string(),
                        count: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            results.insert(word.clone(), hits);
        }

        Ok(results)
    }

    fn count_pages(&self) -> StorageResult<u64> {
        self.count("pages")
    }

    fn count_words(&self) -> StorageResult<u64> {
        self.count("words")
    }

    fn count_postings(&self) -> StorageResult<u64> {
        self.count("page_words")
    }
}
