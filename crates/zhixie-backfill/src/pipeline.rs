//! Backfill pipeline execution.

use std::time::Duration;

use tracing::{debug, info, warn};

use zhixie_core::{BackfillConfig, Result};
use zhixie_fetch::Translator;
use zhixie_lexicon::accept_translation;
use zhixie_store::LexiconStore;

use crate::inflection::backfill_by_inflection;
use crate::types::BackfillReport;

/// Pipeline that fills empty word translations, one pass after another.
pub struct BackfillPipeline;

impl BackfillPipeline {
    /// Run the enabled passes: dictionary, format upgrade, inflection,
    /// translator fallback. Every pass only writes empty translations,
    /// except the format upgrade, which rewrites exact dictionary copies.
    pub fn run(
        store: &LexiconStore,
        config: &BackfillConfig,
        translator: &dyn Translator,
    ) -> Result<BackfillReport> {
        config.validate()?;
        let start = std::time::Instant::now();
        let mut report = BackfillReport::default();

        info!(
            "Starting backfill: {} words missing translations",
            store.count_missing_translations()?
        );

        // Pass 1: exact dictionary matches
        report.dictionary_filled = store.backfill_from_dictionary(config.limit)?;
        info!("Backfilled from dictionary: {}", report.dictionary_filled);

        // Pass 2: prefix bare dictionary copies with their part of speech
        if config.upgrade_format {
            let upgraded = store.upgrade_translation_format(config.upgrade_limit)?;
            info!("Upgraded translation format: {}", upgraded);
            report.format_upgraded = Some(upgraded);
        }

        // Pass 3: dictionary matches through guessed base forms
        if config.use_inflection {
            let filled = backfill_by_inflection(store, config.limit, config.inflection_batch_size)?;
            info!("Backfilled via inflection: {}", filled);
            report.inflection_filled = Some(filled);
        }

        // Pass 4: third-party translation for whatever is left
        if config.use_translator {
            let filled = if translator.is_available() {
                Self::translate_remaining(store, config, translator)?
            } else {
                warn!("Translator fallback requested but no translator is available");
                0
            };
            info!("Backfilled via translator: {}", filled);
            report.translator_filled = Some(filled);
        }

        report.remaining_empty = store.count_missing_translations()?;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Backfill complete: updated={}, remaining={}, duration={}ms",
            report.total_updated(),
            report.remaining_empty,
            report.duration_ms
        );

        Ok(report)
    }

    /// Ask the translator for each remaining word, waiting a fixed delay
    /// between calls. A failed call counts as no answer.
    fn translate_remaining(
        store: &LexiconStore,
        config: &BackfillConfig,
        translator: &dyn Translator,
    ) -> Result<usize> {
        let words = store.words_missing_translation(config.translator_limit())?;
        let delay = Duration::from_millis(config.translator_delay_ms);
        let mut filled = 0;

        for (i, word) in words.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                std::thread::sleep(delay);
            }

            let translated = match translator.translate(&word.text) {
                Ok(t) => t,
                Err(e) => {
                    debug!("Translation of {:?} failed: {}", word.text, e);
                    None
                }
            };

            if let Some(translated) = translated.filter(|t| accept_translation(&word.text, t)) {
                if store.fill_word_translation(word.id, translated.trim(), None, None)? {
                    filled += 1;
                }
            }

            if (i + 1) % 100 == 0 {
                info!("Translator: {}/{} words tried, {} filled", i + 1, words.len(), filled);
            }
        }

        Ok(filled)
    }
}
