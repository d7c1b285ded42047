//! Database schema SQL.

/// Vocabulary tables: sources, words, phrases.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS lexicon_sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    source_type TEXT,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL UNIQUE,
    translation TEXT,
    phonetic TEXT,
    part_of_speech TEXT,
    example TEXT,
    source_id INTEGER REFERENCES lexicon_sources(id),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS phrases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL UNIQUE,
    translation TEXT,
    examples_json TEXT NOT NULL DEFAULT '[]',
    source_id INTEGER REFERENCES lexicon_sources(id),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_words_source ON words(source_id);
CREATE INDEX IF NOT EXISTS idx_words_text_lower ON words(lower(text));
"#;

/// Reference dictionary imported from ECDICT.
pub const DICTIONARY_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS dictionary_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE,
    translation TEXT,
    phonetic TEXT,
    pos TEXT,
    definition TEXT,
    source TEXT NOT NULL DEFAULT 'ecdict',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_dictionary_word ON dictionary_entries(word);
"#;
