//! Streaming ECDICT import into the reference dictionary.

use tracing::info;

use zhixie_core::{DictionarySyncConfig, Result};
use zhixie_fetch::Fetcher;
use zhixie_lexicon::{DictionaryCsvReader, DictionaryRecord};
use zhixie_store::{DictionaryEntry, LexiconStore};

use crate::tolerate_fetch;
use crate::types::DictionarySyncReport;

/// Source tag stored on imported dictionary rows.
pub const DICTIONARY_SOURCE: &str = "ecdict";

/// Stream the dictionary CSV at `config.url` into the store in batches.
///
/// Each batch is committed on its own, so rows imported before a failure
/// stay in place.
pub fn sync_dictionary(
    store: &LexiconStore,
    fetcher: &dyn Fetcher,
    config: &DictionarySyncConfig,
) -> Result<DictionarySyncReport> {
    config.validate()?;
    let start = std::time::Instant::now();
    let mut report = DictionarySyncReport::default();

    let stream = match tolerate_fetch(
        DICTIONARY_SOURCE,
        fetcher.open_stream(&config.url, config.http.dictionary_timeout()),
    )? {
        Some(stream) => stream,
        None => {
            report.skipped = true;
            return Ok(report);
        }
    };

    info!("Syncing dictionary from {}", config.url);
    let mut batch: Vec<DictionaryEntry> = Vec::with_capacity(config.batch_size);
    let mut read = 0usize;

    for record in DictionaryCsvReader::new(stream) {
        batch.push(to_entry(record?));
        read += 1;

        if batch.len() >= config.batch_size {
            flush(store, &mut batch, config.batch_size, &mut report)?;
        }
        if config.limit > 0 && read >= config.limit {
            break;
        }
    }
    flush(store, &mut batch, config.batch_size, &mut report)?;

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Dictionary sync complete: {} rows in {} batches, duration={}ms",
        report.rows_imported, report.batches, report.duration_ms
    );
    Ok(report)
}

fn flush(
    store: &LexiconStore,
    batch: &mut Vec<DictionaryEntry>,
    batch_size: usize,
    report: &mut DictionarySyncReport,
) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    report.rows_imported += store.upsert_dictionary_batch(batch)?;
    report.batches += 1;
    batch.clear();

    if report.rows_imported % (batch_size * 10) == 0 {
        info!("Imported {} rows...", report.rows_imported);
    }
    Ok(())
}

fn to_entry(record: DictionaryRecord) -> DictionaryEntry {
    DictionaryEntry {
        word: record.word,
        translation: record.translation,
        phonetic: record.phonetic,
        pos: record.pos,
        definition: record.definition,
        source: DICTIONARY_SOURCE.to_string(),
    }
}
