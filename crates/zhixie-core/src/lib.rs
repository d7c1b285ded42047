//! Zhixie Core: shared error type, configuration, default sources.

pub mod config;
pub mod error;

pub use config::{
    BackfillConfig, CrawlConfig, DictionarySyncConfig, HttpConfig, SeedConfig, StoreConfig,
    TranslatorConfig, DEFAULT_DB_PATH, ECDICT_CSV_URL, FREQUENCY_LIST_URL, MAX_LOOKUP_BATCH,
    MYMEMORY_URL,
};
pub use error::{Error, Result};
