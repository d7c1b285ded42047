//! Import reports.

use serde::Serialize;

/// Outcome of importing one lexicon source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceImport {
    pub name: String,
    /// Words inserted (seed) or upserted (crawl).
    #[serde(rename = "wordsImported")]
    pub words_imported: usize,
    #[serde(rename = "phrasesImported")]
    pub phrases_imported: usize,
    /// The source could not be fetched and contributed nothing.
    pub skipped: bool,
}

impl SourceImport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skipped: true,
            ..Default::default()
        }
    }
}

/// Result of a seed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub sources: Vec<SourceImport>,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

/// Result of a crawl run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Words removed from the kindergarten level before re-import.
    #[serde(rename = "kindergartenDeleted")]
    pub kindergarten_deleted: usize,
    pub sources: Vec<SourceImport>,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

/// Result of a dictionary sync.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DictionarySyncReport {
    #[serde(rename = "rowsImported")]
    pub rows_imported: usize,
    pub batches: usize,
    /// The dictionary could not be fetched.
    pub skipped: bool,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

/// Totals across sources.
pub trait ImportTotals {
    fn sources(&self) -> &[SourceImport];

    fn total_words(&self) -> usize {
        self.sources().iter().map(|s| s.words_imported).sum()
    }

    fn total_phrases(&self) -> usize {
        self.sources().iter().map(|s| s.phrases_imported).sum()
    }

    fn skipped_sources(&self) -> Vec<&str> {
        self.sources()
            .iter()
            .filter(|s| s.skipped)
            .map(|s| s.name.as_str())
            .collect()
    }
}

impl ImportTotals for SeedReport {
    fn sources(&self) -> &[SourceImport] {
        &self.sources
    }
}

impl ImportTotals for CrawlReport {
    fn sources(&self) -> &[SourceImport] {
        &self.sources
    }
}
