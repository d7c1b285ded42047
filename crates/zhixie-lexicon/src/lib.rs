//! Zhixie Lexicon: lemma heuristics, translation filtering and the parsers
//! for the public word-list formats.

pub mod catalog;
pub mod dictionary;
pub mod lemma;
pub mod levels;
pub mod translation;
pub mod wordlist;

pub use dictionary::{DictionaryCsvReader, DictionaryRecord};
pub use lemma::{generate_lemmas, MAX_LEMMAS};
pub use levels::{parse_level_json, LevelPhrase, LevelWord, ParsedLevel};
pub use translation::{accept_translation, format_translation};
pub use wordlist::{parse_frequency_list, parse_plain_word_list};
