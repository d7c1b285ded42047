//! Level crawl: the kindergarten frequency list, then the graded JSON levels.
//!
//! Unlike seeding, the crawl merges into existing rows, so a word that was
//! imported without a translation picks one up from a later level.

use tracing::info;

use zhixie_core::{CrawlConfig, Result};
use zhixie_fetch::Fetcher;
use zhixie_lexicon::catalog::{RemoteLevel, GRADED_LEVELS, KINDERGARTEN, KINDERGARTEN_DESCRIPTION};
use zhixie_lexicon::{parse_frequency_list, parse_level_json};
use zhixie_store::{LexiconStore, NewPhrase, NewWord};

use crate::types::{CrawlReport, SourceImport};
use crate::{tolerate_fetch, PROGRESS_EVERY};

/// Crawl the frequency list and every graded level into the store.
pub fn run_crawl(store: &LexiconStore, fetcher: &dyn Fetcher, config: &CrawlConfig) -> Result<CrawlReport> {
    let start = std::time::Instant::now();
    let mut report = CrawlReport::default();

    store.ensure_source(KINDERGARTEN, KINDERGARTEN_DESCRIPTION, KINDERGARTEN)?;
    if config.recreate_kindergarten {
        report.kindergarten_deleted = store.delete_words_for_source(KINDERGARTEN)?;
    }
    report.sources.push(crawl_frequency_list(store, fetcher, config)?);

    for level in GRADED_LEVELS {
        report.sources.push(crawl_level(store, fetcher, config, level)?);
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Crawl complete: {} sources, duration={}ms",
        report.sources.len(),
        report.duration_ms
    );
    Ok(report)
}

fn crawl_frequency_list(
    store: &LexiconStore,
    fetcher: &dyn Fetcher,
    config: &CrawlConfig,
) -> Result<SourceImport> {
    let body = match tolerate_fetch(
        KINDERGARTEN,
        fetcher.fetch_text(&config.frequency_list_url, config.http.word_list_timeout()),
    )? {
        Some(body) => body,
        None => return Ok(SourceImport::skipped(KINDERGARTEN)),
    };

    let mut import = SourceImport::new(KINDERGARTEN);
    for text in parse_frequency_list(&body, config.frequency_limit) {
        store.upsert_word(KINDERGARTEN, &NewWord::new(text, ""))?;
        import.words_imported += 1;
        if import.words_imported % PROGRESS_EVERY == 0 {
            info!("{}: {} words imported", KINDERGARTEN, import.words_imported);
        }
    }

    info!("{}: {} frequency words", KINDERGARTEN, import.words_imported);
    Ok(import)
}

fn crawl_level(
    store: &LexiconStore,
    fetcher: &dyn Fetcher,
    config: &CrawlConfig,
    level: &RemoteLevel,
) -> Result<SourceImport> {
    store.ensure_source(level.name, level.description, level.name)?;

    let body = match tolerate_fetch(
        level.name,
        fetcher.fetch_text(level.url, config.http.level_json_timeout()),
    )? {
        Some(body) => body,
        None => return Ok(SourceImport::skipped(level.name)),
    };
    let parsed = parse_level_json(&body)?;

    let mut import = SourceImport::new(level.name);
    for word in parsed.words {
        store.upsert_word(level.name, &NewWord::new(word.text, word.translation))?;
        import.words_imported += 1;
        if import.words_imported % PROGRESS_EVERY == 0 {
            info!("{}: {} words imported", level.name, import.words_imported);
        }
    }
    for phrase in parsed.phrases {
        store.upsert_phrase(
            level.name,
            &NewPhrase {
                text: phrase.text,
                translation: phrase.translation,
                examples: Vec::new(),
            },
        )?;
        import.phrases_imported += 1;
    }

    info!(
        "{}: {} words, {} phrases",
        level.name, import.words_imported, import.phrases_imported
    );
    Ok(import)
}
