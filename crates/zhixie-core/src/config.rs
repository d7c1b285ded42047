//! Configuration for the import and backfill jobs.
//!
//! Every job takes its configuration as an explicit value. Defaults mirror
//! the command-line defaults so tests can build isolated fixtures with
//! `..Default::default()`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Frequency-ranked English word list used for the kindergarten level.
pub const FREQUENCY_LIST_URL: &str =
    "https://raw.githubusercontent.com/first20hours/google-10000-english/master/google-10000-english.txt";

/// ECDICT English→Chinese dictionary dump.
pub const ECDICT_CSV_URL: &str =
    "https://raw.githubusercontent.com/skywind3000/ECDICT/master/ecdict.csv";

/// MyMemory translation endpoint.
pub const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/zhixie.db";

/// Most keys a single `IN (...)` lookup may bind; SQLite caps host
/// parameters at 32766.
pub const MAX_LOOKUP_BATCH: usize = 32_766;

/// Location of the SQLite database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Use `explicit` if given (the CLI also reads `ZHIXIE_DB` into it),
    /// otherwise the default path.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let db_path = explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        debug!("Database path resolved to {}", db_path.display());
        Self { db_path }
    }
}

/// Per-request timeouts for the remote sources, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub word_list_timeout_secs: u64,
    pub level_json_timeout_secs: u64,
    pub dictionary_timeout_secs: u64,
    pub seed_timeout_secs: u64,
    pub translator_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            word_list_timeout_secs: 60,
            level_json_timeout_secs: 120,
            dictionary_timeout_secs: 120,
            seed_timeout_secs: 30,
            translator_timeout_secs: 30,
        }
    }
}

impl HttpConfig {
    pub fn word_list_timeout(&self) -> Duration {
        Duration::from_secs(self.word_list_timeout_secs)
    }

    pub fn level_json_timeout(&self) -> Duration {
        Duration::from_secs(self.level_json_timeout_secs)
    }

    pub fn dictionary_timeout(&self) -> Duration {
        Duration::from_secs(self.dictionary_timeout_secs)
    }

    pub fn seed_timeout(&self) -> Duration {
        Duration::from_secs(self.seed_timeout_secs)
    }

    pub fn translator_timeout(&self) -> Duration {
        Duration::from_secs(self.translator_timeout_secs)
    }
}

/// Seed import of the built-in levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Also fetch the remote raw-text levels.
    pub include_remote: bool,
    pub http: HttpConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            include_remote: true,
            http: HttpConfig::default(),
        }
    }
}

/// Crawl of the frequency list and the graded JSON levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub frequency_list_url: String,
    /// Maximum number of frequency-list words to import (0 = all).
    pub frequency_limit: usize,
    /// Delete every word of the kindergarten level before re-importing it.
    pub recreate_kindergarten: bool,
    pub http: HttpConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            frequency_list_url: FREQUENCY_LIST_URL.into(),
            frequency_limit: 10_000,
            recreate_kindergarten: false,
            http: HttpConfig::default(),
        }
    }
}

/// Streaming import of the ECDICT CSV into the dictionary table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionarySyncConfig {
    pub url: String,
    /// Only import the first N rows (0 = all).
    pub limit: usize,
    pub batch_size: usize,
    pub http: HttpConfig,
}

impl Default for DictionarySyncConfig {
    fn default() -> Self {
        Self {
            url: ECDICT_CSV_URL.into(),
            limit: 0,
            batch_size: 1000,
            http: HttpConfig::default(),
        }
    }
}

impl DictionarySyncConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Translation backfill passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillConfig {
    /// Max rows to backfill per pass.
    pub limit: usize,
    /// Prefix dictionary-filled translations with their part of speech.
    pub upgrade_format: bool,
    pub upgrade_limit: usize,
    /// Match remaining words through generated lemmas.
    pub use_inflection: bool,
    pub inflection_batch_size: usize,
    /// Fall back to the third-party translation API.
    pub use_translator: bool,
    /// Fixed delay between successive translator calls.
    pub translator_delay_ms: u64,
    /// Upper bound on rows sent to the translator in one run.
    pub translator_cap: usize,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            limit: 50_000,
            upgrade_format: false,
            upgrade_limit: 50_000,
            use_inflection: false,
            inflection_batch_size: 500,
            use_translator: false,
            translator_delay_ms: 200,
            translator_cap: 2000,
        }
    }
}

impl BackfillConfig {
    pub fn validate(&self) -> Result<()> {
        if self.inflection_batch_size == 0 {
            return Err(Error::Config(
                "inflection_batch_size must be greater than 0".into(),
            ));
        }
        if self.inflection_batch_size > MAX_LOOKUP_BATCH {
            return Err(Error::Config(format!(
                "inflection_batch_size must be at most {}",
                MAX_LOOKUP_BATCH
            )));
        }
        Ok(())
    }

    /// Rows handed to the translator fallback.
    pub fn translator_limit(&self) -> usize {
        self.limit.min(self.translator_cap)
    }
}

/// Third-party translation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub langpair: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: MYMEMORY_URL.into(),
            langpair: "en|zh-CN".into(),
        }
    }
}
