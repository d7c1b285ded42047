//! SQLite-backed vocabulary store.
//!
//! Every write is an upsert keyed by a unique column, or a conditional update
//! that only touches empty fields, so re-running an import or a backfill pass
//! never clobbers data that is already there.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::{DICTIONARY_SCHEMA_SQL, SCHEMA_SQL};
use crate::types::*;
use zhixie_core::{Error, Result};

/// SQLite store holding sources, words, phrases and the reference dictionary.
pub struct LexiconStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl LexiconStore {
    /// Open or create the database file at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!(
            "LexiconStore initialized: {} words, {} dictionary entries, path={}",
            store.count_words()?,
            store.count_dictionary_entries()?,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        let full_schema = format!("{}\n{}", SCHEMA_SQL, DICTIONARY_SCHEMA_SQL);
        conn.execute_batch(&full_schema)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    // ---------------------------------------------------------------
    // Lexicon sources
    // ---------------------------------------------------------------

    /// Insert a source if its name is new. Returns the source ID either way.
    pub fn ensure_source(&self, name: &str, description: &str, source_type: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO lexicon_sources (name, description, source_type, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(name) DO NOTHING",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![name, description, source_type, now_millis()])
        .map_err(|e| Error::Database(e.to_string()))?;

        let id = conn
            .prepare_cached("SELECT id FROM lexicon_sources WHERE name = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![name], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    // ---------------------------------------------------------------
    // Words
    // ---------------------------------------------------------------

    /// Insert a word unless its text already exists. Returns whether a row was added.
    pub fn insert_word_if_absent(&self, source: &str, word: &NewWord) -> Result<bool> {
        let text = normalize_word(&word.text)?;
        let now = now_millis();
        let conn = self.conn.lock();
        let count = conn
            .prepare_cached(
                "INSERT INTO words
                   (text, translation, phonetic, part_of_speech, example, source_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5,
                   (SELECT id FROM lexicon_sources WHERE name = ?6), ?7, ?7)
                 ON CONFLICT(text) DO NOTHING",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .execute(params![
                text,
                word.translation.trim(),
                word.phonetic,
                word.part_of_speech,
                word.example,
                source,
                now
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Insert a word, or merge into the existing row.
    ///
    /// The stored translation is only replaced while it is empty; phonetic,
    /// part of speech and example are only filled when missing.
    pub fn upsert_word(&self, source: &str, word: &NewWord) -> Result<()> {
        let text = normalize_word(&word.text)?;
        let now = now_millis();
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO words
               (text, translation, phonetic, part_of_speech, example, source_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5,
               (SELECT id FROM lexicon_sources WHERE name = ?6), ?7, ?7)
             ON CONFLICT(text) DO UPDATE SET
               translation = CASE
                 WHEN COALESCE(trim(words.translation), '') = '' THEN excluded.translation
                 ELSE words.translation
               END,
               phonetic = COALESCE(NULLIF(words.phonetic, ''), excluded.phonetic),
               part_of_speech = COALESCE(NULLIF(words.part_of_speech, ''), excluded.part_of_speech),
               example = COALESCE(NULLIF(words.example, ''), excluded.example),
               updated_at = excluded.updated_at",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            text,
            word.translation.trim(),
            word.phonetic,
            word.part_of_speech,
            word.example,
            source,
            now
        ])
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete every word belonging to a source. Returns the number removed.
    pub fn delete_words_for_source(&self, source: &str) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "DELETE FROM words
                 WHERE source_id = (SELECT id FROM lexicon_sources WHERE name = ?1)",
                params![source],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        if count > 0 {
            info!("Deleted {} words from source {}", count, source);
        }
        Ok(count)
    }

    /// Get a word by text (case-insensitive).
    pub fn get_word(&self, text: &str) -> Result<Option<Word>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached(
                "SELECT id, text, translation, phonetic, part_of_speech, example, source_id
                 FROM words WHERE text = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![text.trim().to_lowercase()], Self::row_to_word)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Words whose translation is NULL or blank, ordered by ID.
    pub fn words_missing_translation(&self, limit: usize) -> Result<Vec<PendingWord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, text FROM words
                 WHERE translation IS NULL OR trim(translation) = ''
                 ORDER BY id
                 LIMIT ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(PendingWord {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Set a word's translation if it is still empty.
    ///
    /// Phonetic and part of speech are filled only where the word has none.
    /// Returns whether the row was updated.
    pub fn fill_word_translation(
        &self,
        word_id: i64,
        translation: &str,
        phonetic: Option<&str>,
        part_of_speech: Option<&str>,
    ) -> Result<bool> {
        let conn = self.conn.lock();
        fill_translation(&conn, word_id, translation, phonetic, part_of_speech)
    }

    /// Fill empty translations from exact dictionary matches.
    ///
    /// Translations are written as `"<pos>. <translation>"` when the entry
    /// has a part of speech. Returns the number of words updated.
    pub fn backfill_from_dictionary(&self, limit: usize) -> Result<usize> {
        let conn = self.conn.lock();
        let targets: Vec<(i64, String, Option<String>, Option<String>)> = {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT w.id,
                       CASE
                         WHEN COALESCE(d.pos, '') <> '' THEN d.pos || '. ' || d.translation
                         ELSE d.translation
                       END,
                       d.phonetic,
                       d.pos
                     FROM words w
                     JOIN dictionary_entries d ON lower(w.text) = d.word
                     WHERE (w.translation IS NULL OR trim(w.translation) = '')
                       AND d.translation IS NOT NULL AND d.translation <> ''
                     ORDER BY w.id
                     LIMIT ?1",
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })
                .map_err(|e| Error::Database(e.to_string()))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::Database(e.to_string()))?
        };

        let mut updated = 0;
        for (word_id, formatted, phonetic, pos) in &targets {
            if fill_translation(&conn, *word_id, formatted, phonetic.as_deref(), pos.as_deref())? {
                updated += 1;
            }
        }
        debug!("Dictionary backfill: {} candidates, {} updated", targets.len(), updated);
        Ok(updated)
    }

    /// Prefix bare dictionary translations with the dictionary's part of speech.
    ///
    /// Only words whose translation is exactly the dictionary's unformatted
    /// translation are touched, and only when the entry has a part of speech.
    pub fn upgrade_translation_format(&self, limit: usize) -> Result<usize> {
        let conn = self.conn.lock();
        let targets: Vec<(i64, String, String)> = {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT w.id, d.translation, d.pos
                     FROM words w
                     JOIN dictionary_entries d ON lower(w.text) = d.word
                     WHERE d.pos IS NOT NULL AND d.pos <> ''
                       AND d.translation IS NOT NULL AND d.translation <> ''
                       AND w.translation = d.translation
                     ORDER BY w.id
                     LIMIT ?1",
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .map_err(|e| Error::Database(e.to_string()))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::Database(e.to_string()))?
        };

        let now = now_millis();
        let mut updated = 0;
        for (word_id, translation, pos) in &targets {
            let count = conn
                .prepare_cached(
                    "UPDATE words
                     SET translation = ?1,
                         part_of_speech = COALESCE(NULLIF(part_of_speech, ''), ?2),
                         updated_at = ?3
                     WHERE id = ?4 AND translation = ?5",
                )
                .map_err(|e| Error::Database(e.to_string()))?
                .execute(params![
                    format!("{}. {}", pos, translation),
                    pos,
                    now,
                    word_id,
                    translation
                ])
                .map_err(|e| Error::Database(e.to_string()))?;
            updated += count;
        }
        Ok(updated)
    }

    /// Count words with a NULL or blank translation.
    pub fn count_missing_translations(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT COUNT(*) FROM words WHERE translation IS NULL OR trim(translation) = ''",
            [],
            |row| row.get(0),
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count total words.
    pub fn count_words(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count words belonging to a source.
    pub fn count_words_for_source(&self, source: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT COUNT(*) FROM words
             WHERE source_id = (SELECT id FROM lexicon_sources WHERE name = ?1)",
            params![source],
            |row| row.get(0),
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Phrases
    // ---------------------------------------------------------------

    /// Insert a phrase, or merge into the existing row with the same rule as words.
    pub fn upsert_phrase(&self, source: &str, phrase: &NewPhrase) -> Result<()> {
        let text = phrase.text.trim();
        if text.is_empty() {
            return Err(Error::Storage("phrase text is empty".into()));
        }
        let examples_json = serde_json::to_string(&phrase.examples)?;
        let now = now_millis();
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO phrases (text, translation, examples_json, source_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, (SELECT id FROM lexicon_sources WHERE name = ?4), ?5, ?5)
             ON CONFLICT(text) DO UPDATE SET
               translation = CASE
                 WHEN COALESCE(trim(phrases.translation), '') = '' THEN excluded.translation
                 ELSE phrases.translation
               END,
               examples_json = CASE
                 WHEN phrases.examples_json = '[]' THEN excluded.examples_json
                 ELSE phrases.examples_json
               END,
               updated_at = excluded.updated_at",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![text, phrase.translation.trim(), examples_json, source, now])
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a phrase by exact text.
    pub fn get_phrase(&self, text: &str) -> Result<Option<Phrase>> {
        let conn = self.conn.lock();
        let row: Option<(i64, String, Option<String>, String, Option<i64>)> = conn
            .prepare_cached(
                "SELECT id, text, translation, examples_json, source_id FROM phrases WHERE text = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![text.trim()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some((id, text, translation, examples_json, source_id)) => Ok(Some(Phrase {
                id,
                text,
                translation,
                examples: serde_json::from_str(&examples_json)?,
                source_id,
            })),
            None => Ok(None),
        }
    }

    /// Count total phrases.
    pub fn count_phrases(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM phrases", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Dictionary
    // ---------------------------------------------------------------

    /// Upsert a batch of dictionary entries in one transaction.
    ///
    /// Existing rows keep every non-empty field; empty fields are filled
    /// from the incoming entry. Returns the batch size.
    pub fn upsert_dictionary_batch(&self, entries: &[DictionaryEntry]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }
        let now = now_millis();
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| Error::Database(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO dictionary_entries
                       (word, translation, phonetic, pos, definition, source, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                     ON CONFLICT(word) DO UPDATE SET
                       translation = CASE
                         WHEN COALESCE(dictionary_entries.translation, '') = '' THEN excluded.translation
                         ELSE dictionary_entries.translation
                       END,
                       phonetic = COALESCE(NULLIF(dictionary_entries.phonetic, ''), excluded.phonetic),
                       pos = COALESCE(NULLIF(dictionary_entries.pos, ''), excluded.pos),
                       definition = COALESCE(NULLIF(dictionary_entries.definition, ''), excluded.definition),
                       updated_at = excluded.updated_at",
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            for entry in entries {
                stmt.execute(params![
                    entry.word,
                    entry.translation,
                    entry.phonetic,
                    entry.pos,
                    entry.definition,
                    entry.source,
                    now
                ])
                .map_err(|e| Error::Database(e.to_string()))?;
            }
        }
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        Ok(entries.len())
    }

    /// Fetch dictionary entries for an exact set of words.
    ///
    /// Entries without a translation are left out. Callers bound the number
    /// of words per call.
    pub fn dictionary_entries_for(&self, words: &[String]) -> Result<Vec<DictionaryEntry>> {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; words.len()].join(",");
        let sql = format!(
            "SELECT word, translation, phonetic, pos, definition, source
             FROM dictionary_entries
             WHERE word IN ({})
               AND translation IS NOT NULL AND translation <> ''",
            placeholders
        );

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(words.iter()), Self::row_to_entry)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Get a dictionary entry by word.
    pub fn get_dictionary_entry(&self, word: &str) -> Result<Option<DictionaryEntry>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached(
                "SELECT word, translation, phonetic, pos, definition, source
                 FROM dictionary_entries WHERE word = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![word.trim().to_lowercase()], Self::row_to_entry)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Count dictionary entries.
    pub fn count_dictionary_entries(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM dictionary_entries", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    pub fn get_stats(&self) -> Result<StoreStats> {
        let sources: i64 = {
            let conn = self.conn.lock();
            conn.query_row("SELECT COUNT(*) FROM lexicon_sources", [], |row| row.get(0))
                .map_err(|e| Error::Database(e.to_string()))?
        };
        Ok(StoreStats {
            sources,
            words: self.count_words()?,
            phrases: self.count_phrases()?,
            dictionary_entries: self.count_dictionary_entries()?,
            missing_translations: self.count_missing_translations()?,
        })
    }

    // ---------------------------------------------------------------
    // Row mapping
    // ---------------------------------------------------------------

    fn row_to_word(row: &rusqlite::Row<'_>) -> rusqlite::Result<Word> {
        Ok(Word {
            id: row.get(0)?,
            text: row.get(1)?,
            translation: row.get(2)?,
            phonetic: row.get(3)?,
            part_of_speech: row.get(4)?,
            example: row.get(5)?,
            source_id: row.get(6)?,
        })
    }

    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<DictionaryEntry> {
        Ok(DictionaryEntry {
            word: row.get(0)?,
            translation: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            phonetic: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            pos: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            definition: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            source: row.get(5)?,
        })
    }
}

fn fill_translation(
    conn: &Connection,
    word_id: i64,
    translation: &str,
    phonetic: Option<&str>,
    part_of_speech: Option<&str>,
) -> Result<bool> {
    let translation = translation.trim();
    if translation.is_empty() {
        return Ok(false);
    }
    let count = conn
        .prepare_cached(
            "UPDATE words
             SET translation = ?1,
                 phonetic = COALESCE(NULLIF(phonetic, ''), NULLIF(?2, '')),
                 part_of_speech = COALESCE(NULLIF(part_of_speech, ''), NULLIF(?3, '')),
                 updated_at = ?4
             WHERE id = ?5 AND (translation IS NULL OR trim(translation) = '')",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![translation, phonetic, part_of_speech, now_millis(), word_id])
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(count > 0)
}

fn normalize_word(text: &str) -> Result<String> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return Err(Error::Storage("word text is empty".into()));
    }
    Ok(text)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (LexiconStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LexiconStore::open(dir.path().join("zhixie.db")).unwrap();
        store
            .ensure_source("lexicon_test", "Test words", "lexicon_test")
            .unwrap();
        (store, dir)
    }

    fn entry(word: &str, translation: &str, pos: &str) -> DictionaryEntry {
        DictionaryEntry {
            word: word.into(),
            translation: translation.into(),
            pos: pos.into(),
            source: "ecdict".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ensure_source_is_idempotent() {
        let (store, _dir) = test_store();
        let first = store.ensure_source("lexicon_cet4", "CET-4", "lexicon_cet4").unwrap();
        let second = store.ensure_source("lexicon_cet4", "changed", "other").unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get_stats().unwrap().sources, 2);
    }

    #[test]
    fn test_upsert_word_is_idempotent() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("Apple", "苹果")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("apple", "苹果")).unwrap();

        assert_eq!(store.count_words().unwrap(), 1);
        let word = store.get_word("apple").unwrap().unwrap();
        assert_eq!(word.text, "apple");
        assert_eq!(word.translation.as_deref(), Some("苹果"));
    }

    #[test]
    fn test_upsert_word_never_erases_translation() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("run", "跑")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("run", "")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("run", "奔跑")).unwrap();

        let word = store.get_word("run").unwrap().unwrap();
        assert_eq!(word.translation.as_deref(), Some("跑"));
    }

    #[test]
    fn test_upsert_word_fills_empty_translation() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("cat", "")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("cat", "猫")).unwrap();

        let word = store.get_word("cat").unwrap().unwrap();
        assert_eq!(word.translation.as_deref(), Some("猫"));
    }

    #[test]
    fn test_insert_word_if_absent_keeps_first() {
        let (store, _dir) = test_store();
        assert!(store
            .insert_word_if_absent("lexicon_test", &NewWord::new("dog", "狗"))
            .unwrap());
        assert!(!store
            .insert_word_if_absent("lexicon_test", &NewWord::new("dog", "犬"))
            .unwrap());

        let word = store.get_word("dog").unwrap().unwrap();
        assert_eq!(word.translation.as_deref(), Some("狗"));
    }

    #[test]
    fn test_empty_word_rejected() {
        let (store, _dir) = test_store();
        let result = store.upsert_word("lexicon_test", &NewWord::new("   ", "x"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_delete_words_for_source() {
        let (store, _dir) = test_store();
        store.ensure_source("lexicon_other", "Other", "lexicon_other").unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("one", "")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("two", "")).unwrap();
        store.upsert_word("lexicon_other", &NewWord::new("three", "")).unwrap();

        assert_eq!(store.delete_words_for_source("lexicon_test").unwrap(), 2);
        assert_eq!(store.count_words().unwrap(), 1);
        assert_eq!(store.count_words_for_source("lexicon_other").unwrap(), 1);
    }

    #[test]
    fn test_upsert_phrase_keeps_translation_and_examples() {
        let (store, _dir) = test_store();
        store
            .upsert_phrase(
                "lexicon_test",
                &NewPhrase {
                    text: "by heart".into(),
                    translation: "熟记于心".into(),
                    examples: vec!["Learn the words by heart.".into()],
                },
            )
            .unwrap();
        store
            .upsert_phrase(
                "lexicon_test",
                &NewPhrase {
                    text: "by heart".into(),
                    translation: "".into(),
                    examples: vec![],
                },
            )
            .unwrap();

        assert_eq!(store.count_phrases().unwrap(), 1);
        let phrase = store.get_phrase("by heart").unwrap().unwrap();
        assert_eq!(phrase.translation.as_deref(), Some("熟记于心"));
        assert_eq!(phrase.examples, vec!["Learn the words by heart.".to_string()]);
    }

    #[test]
    fn test_dictionary_merge_is_conservative() {
        let (store, _dir) = test_store();
        store
            .upsert_dictionary_batch(&[entry("apple", "", "n")])
            .unwrap();
        store
            .upsert_dictionary_batch(&[DictionaryEntry {
                phonetic: "'æpl".into(),
                ..entry("apple", "苹果", "v")
            }])
            .unwrap();
        store
            .upsert_dictionary_batch(&[entry("apple", "苹果树", "adj")])
            .unwrap();

        let found = store.get_dictionary_entry("apple").unwrap().unwrap();
        assert_eq!(found.translation, "苹果");
        assert_eq!(found.pos, "n");
        assert_eq!(found.phonetic, "'æpl");
        assert_eq!(store.count_dictionary_entries().unwrap(), 1);
    }

    #[test]
    fn test_dictionary_entries_for_skips_empty_translations() {
        let (store, _dir) = test_store();
        store
            .upsert_dictionary_batch(&[
                entry("city", "城市", "n"),
                entry("box", "盒子", "n"),
                entry("blank", "", "n"),
            ])
            .unwrap();

        let words = vec!["city".to_string(), "blank".to_string(), "missing".to_string()];
        let found = store.dictionary_entries_for(&words).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word, "city");

        assert!(store.dictionary_entries_for(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_words_missing_translation_ordered_and_limited() {
        let (store, _dir) = test_store();
        for text in ["zebra", "apple", "mango"] {
            store.upsert_word("lexicon_test", &NewWord::new(text, "")).unwrap();
        }
        store.upsert_word("lexicon_test", &NewWord::new("done", "完成")).unwrap();

        let pending = store.words_missing_translation(2).unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].text, "zebra");
        assert_eq!(pending[1].text, "apple");
        assert_eq!(store.count_missing_translations().unwrap(), 3);
    }

    #[test]
    fn test_fill_word_translation_only_when_empty() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("cities", "")).unwrap();
        let id = store.get_word("cities").unwrap().unwrap().id;

        assert!(store
            .fill_word_translation(id, "n. 城市", Some("'siti"), Some("n"))
            .unwrap());
        assert!(!store.fill_word_translation(id, "other", None, None).unwrap());
        assert!(!store.fill_word_translation(id, "   ", None, None).unwrap());

        let word = store.get_word("cities").unwrap().unwrap();
        assert_eq!(word.translation.as_deref(), Some("n. 城市"));
        assert_eq!(word.phonetic.as_deref(), Some("'siti"));
        assert_eq!(word.part_of_speech.as_deref(), Some("n"));
    }

    #[test]
    fn test_backfill_from_dictionary_formats_and_is_idempotent() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("apple", "")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("ngc", "")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("dog", "狗")).unwrap();
        store
            .upsert_dictionary_batch(&[
                entry("apple", "苹果", "n"),
                entry("ngc", "星云星团新总表", ""),
                entry("dog", "犬", "n"),
            ])
            .unwrap();

        assert_eq!(store.backfill_from_dictionary(100).unwrap(), 2);
        assert_eq!(store.backfill_from_dictionary(100).unwrap(), 0);

        let apple = store.get_word("apple").unwrap().unwrap();
        assert_eq!(apple.translation.as_deref(), Some("n. 苹果"));
        assert_eq!(apple.part_of_speech.as_deref(), Some("n"));
        let ngc = store.get_word("ngc").unwrap().unwrap();
        assert_eq!(ngc.translation.as_deref(), Some("星云星团新总表"));
        let dog = store.get_word("dog").unwrap().unwrap();
        assert_eq!(dog.translation.as_deref(), Some("狗"));
    }

    #[test]
    fn test_upgrade_format_exact_match_only() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("apple", "苹果")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("pear", "n. 梨")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("plum", "李子，梅子")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("ngc", "星团")).unwrap();
        store
            .upsert_dictionary_batch(&[
                entry("apple", "苹果", "n"),
                entry("pear", "梨", "n"),
                entry("plum", "李子", "n"),
                entry("ngc", "星团", ""),
            ])
            .unwrap();

        assert_eq!(store.upgrade_translation_format(100).unwrap(), 1);
        assert_eq!(store.upgrade_translation_format(100).unwrap(), 0);

        let get = |t: &str| store.get_word(t).unwrap().unwrap().translation.unwrap();
        assert_eq!(get("apple"), "n. 苹果");
        assert_eq!(get("pear"), "n. 梨");
        assert_eq!(get("plum"), "李子，梅子");
        assert_eq!(get("ngc"), "星团");
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("one", "一")).unwrap();
        store.upsert_word("lexicon_test", &NewWord::new("two", "")).unwrap();
        store
            .upsert_dictionary_batch(&[entry("one", "一", "num")])
            .unwrap();

        let stats = store.get_stats().unwrap();
        assert_eq!(stats.sources, 1);
        assert_eq!(stats.words, 2);
        assert_eq!(stats.dictionary_entries, 1);
        assert_eq!(stats.missing_translations, 1);
    }
}
