//! Row types for words, phrases and dictionary entries.

use serde::{Deserialize, Serialize};

/// A word row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "sourceId")]
    pub source_id: Option<i64>,
}

impl Word {
    /// True when the translation is NULL or blank.
    pub fn translation_is_empty(&self) -> bool {
        self.translation
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true)
    }
}

/// A phrase row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phrase {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "sourceId")]
    pub source_id: Option<i64>,
}

/// A word waiting for a translation: `(id, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWord {
    pub id: i64,
    pub text: String,
}

/// Reference dictionary record keyed by lowercase word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub translation: String,
    pub phonetic: String,
    pub pos: String,
    pub definition: String,
    pub source: String,
}

/// Fields for inserting or merging a word.
#[derive(Debug, Clone, Default)]
pub struct NewWord {
    pub text: String,
    pub translation: String,
    pub phonetic: Option<String>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

impl NewWord {
    /// Word with a translation only.
    pub fn new(text: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translation: translation.into(),
            ..Default::default()
        }
    }
}

/// Fields for inserting or merging a phrase.
#[derive(Debug, Clone, Default)]
pub struct NewPhrase {
    pub text: String,
    pub translation: String,
    pub examples: Vec<String>,
}

/// Store-level counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub sources: i64,
    pub words: i64,
    pub phrases: i64,
    #[serde(rename = "dictionaryEntries")]
    pub dictionary_entries: i64,
    #[serde(rename = "missingTranslations")]
    pub missing_translations: i64,
}
