//! Streaming reader for ECDICT-style dictionary CSV dumps.
//!
//! The dump has a header row; the columns used here are `word`, `phonetic`,
//! `definition`, `translation` and `pos`. Other columns are ignored.

use std::io::Read;

use serde::Deserialize;

use zhixie_core::{Error, Result};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    pos: Option<String>,
}

/// One normalized dictionary row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryRecord {
    pub word: String,
    pub translation: String,
    pub phonetic: String,
    pub pos: String,
    pub definition: String,
}

/// Iterator over the records of a dictionary CSV.
///
/// Fields are trimmed, words lowercased, rows without a word skipped.
/// Malformed rows surface as `Error::Parse`, read failures of the
/// underlying stream as `Error::Http`.
pub struct DictionaryCsvReader<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, CsvRow>,
}

impl<R: Read> DictionaryCsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_deserialize();
        Self { rows }
    }
}

impl<R: Read> Iterator for DictionaryCsvReader<R> {
    type Item = Result<DictionaryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            let row = match row {
                Ok(r) => r,
                Err(e) => return Some(Err(csv_error(e))),
            };
            let word = clean(row.word).to_lowercase();
            if word.is_empty() {
                continue;
            }
            return Some(Ok(DictionaryRecord {
                word,
                translation: clean(row.translation),
                phonetic: clean(row.phonetic),
                pos: clean(row.pos),
                definition: clean(row.definition),
            }));
        }
        None
    }
}

// A failed read of the underlying stream is a fetch failure, not bad content.
fn csv_error(e: csv::Error) -> Error {
    match e.kind() {
        csv::ErrorKind::Io(io) => Error::Http(format!("dictionary stream: {}", io)),
        _ => Error::Parse(format!("dictionary csv: {}", e)),
    }
}

fn clean(field: Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_string()
}
