//! Zhixie Store: SQLite tables for lexicon sources, words, phrases and the
//! reference dictionary.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::LexiconStore;
pub use types::*;
