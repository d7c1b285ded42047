//! Seed import: the built-in literal levels, then the raw-text exam lists.
//!
//! Seeding never changes an existing word; words already present (from any
//! source) are left alone.

use tracing::info;

use zhixie_core::{Result, SeedConfig};
use zhixie_fetch::Fetcher;
use zhixie_lexicon::catalog::{LocalLevel, RemoteLevel, LOCAL_LEVELS, REMOTE_LEVELS};
use zhixie_lexicon::parse_plain_word_list;
use zhixie_store::{LexiconStore, NewPhrase, NewWord};

use crate::types::{SeedReport, SourceImport};
use crate::{tolerate_fetch, PROGRESS_EVERY};

/// Seed the store with the built-in levels.
pub fn run_seed(store: &LexiconStore, fetcher: &dyn Fetcher, config: &SeedConfig) -> Result<SeedReport> {
    let start = std::time::Instant::now();
    let mut report = SeedReport::default();

    info!("Seeding {} local levels", LOCAL_LEVELS.len());
    for level in LOCAL_LEVELS {
        report.sources.push(seed_local(store, level)?);
    }

    if config.include_remote {
        for level in REMOTE_LEVELS {
            report.sources.push(seed_remote(store, fetcher, config, level)?);
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Seed complete: {} sources, duration={}ms",
        report.sources.len(),
        report.duration_ms
    );
    Ok(report)
}

fn seed_local(store: &LexiconStore, level: &LocalLevel) -> Result<SourceImport> {
    store.ensure_source(level.name, level.description, level.name)?;
    let mut import = SourceImport::new(level.name);

    for word in level.words {
        let new_word = NewWord {
            text: word.text.to_string(),
            translation: word.translation.to_string(),
            phonetic: None,
            part_of_speech: word.part_of_speech.map(str::to_string),
            example: word.example.map(str::to_string),
        };
        if store.insert_word_if_absent(level.name, &new_word)? {
            import.words_imported += 1;
        }
    }

    for phrase in level.phrases {
        store.upsert_phrase(
            level.name,
            &NewPhrase {
                text: phrase.text.to_string(),
                translation: phrase.translation.to_string(),
                examples: phrase.examples.iter().map(|e| e.to_string()).collect(),
            },
        )?;
        import.phrases_imported += 1;
    }

    info!("{}: {} words added", level.name, import.words_imported);
    Ok(import)
}

fn seed_remote(
    store: &LexiconStore,
    fetcher: &dyn Fetcher,
    config: &SeedConfig,
    level: &RemoteLevel,
) -> Result<SourceImport> {
    store.ensure_source(level.name, level.description, level.name)?;

    let body = match tolerate_fetch(
        level.name,
        fetcher.fetch_text(level.url, config.http.seed_timeout()),
    )? {
        Some(body) => body,
        None => return Ok(SourceImport::skipped(level.name)),
    };

    let words = parse_plain_word_list(&body);
    let mut import = SourceImport::new(level.name);
    for (i, text) in words.iter().enumerate() {
        if store.insert_word_if_absent(level.name, &NewWord::new(text.as_str(), ""))? {
            import.words_imported += 1;
        }
        if (i + 1) % PROGRESS_EVERY == 0 {
            info!("{}: {}/{} words processed", level.name, i + 1, words.len());
        }
    }

    info!(
        "{}: {} of {} listed words added",
        level.name,
        import.words_imported,
        words.len()
    );
    Ok(import)
}
