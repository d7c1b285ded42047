//! Graded vocabulary JSON documents.
//!
//! Each document is an array of items shaped like
//! `{"word": "...", "translations": [{"translation": "...", "type": "n"}],
//!   "phrases": [{"phrase": "...", "translation": "..."}]}`.

use serde::Deserialize;
use tracing::debug;

use zhixie_core::Result;

/// Separator between senses of a multi-sense translation.
pub const SENSE_SEPARATOR: &str = "；";

#[derive(Debug, Deserialize)]
struct LevelItem {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    translations: Option<Vec<LevelTranslation>>,
    #[serde(default)]
    phrases: Option<Vec<LevelPhraseItem>>,
}

#[derive(Debug, Deserialize)]
struct LevelTranslation {
    #[serde(default)]
    translation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LevelPhraseItem {
    #[serde(default)]
    phrase: Option<String>,
    #[serde(default)]
    translation: Option<String>,
}

/// A word and its joined translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelWord {
    pub text: String,
    pub translation: String,
}

/// A phrase and its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPhrase {
    pub text: String,
    pub translation: String,
}

/// Words and phrases parsed from one level document.
#[derive(Debug, Clone, Default)]
pub struct ParsedLevel {
    pub words: Vec<LevelWord>,
    pub phrases: Vec<LevelPhrase>,
}

/// Parse a level document. Items without a word are skipped; phrases of
/// skipped items are skipped with them.
pub fn parse_level_json(body: &str) -> Result<ParsedLevel> {
    let items: Vec<LevelItem> = serde_json::from_str(body)?;
    let mut parsed = ParsedLevel::default();

    for item in items {
        let word = item.word.as_deref().unwrap_or("").trim().to_lowercase();
        if word.is_empty() {
            continue;
        }

        let senses: Vec<&str> = item
            .translations
            .iter()
            .flatten()
            .filter_map(|t| t.translation.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        parsed.words.push(LevelWord {
            text: word,
            translation: senses.join(SENSE_SEPARATOR),
        });

        for p in item.phrases.iter().flatten() {
            let text = p.phrase.as_deref().unwrap_or("").trim();
            if text.is_empty() {
                continue;
            }
            parsed.phrases.push(LevelPhrase {
                text: text.to_string(),
                translation: p.translation.as_deref().unwrap_or("").trim().to_string(),
            });
        }
    }

    debug!(
        "Parsed level: {} words, {} phrases",
        parsed.words.len(),
        parsed.phrases.len()
    );
    Ok(parsed)
}
