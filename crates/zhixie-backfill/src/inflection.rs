//! Dictionary matching through guessed base forms.
//!
//! Words without a translation are expanded into ordered candidates (the
//! word itself, then its lemma guesses). The distinct candidates are looked
//! up in fixed-size chunks, and each word then takes the first of its own
//! candidates that the dictionary knows.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use zhixie_core::Result;
use zhixie_lexicon::{format_translation, generate_lemmas};
use zhixie_store::{DictionaryEntry, LexiconStore, PendingWord};

/// Per-word candidate lists plus the distinct lookup keys they share.
#[derive(Debug, Default)]
pub struct LemmaIndex {
    keys: Vec<String>,
    words: Vec<(i64, Vec<String>)>,
}

impl LemmaIndex {
    pub fn build(words: &[PendingWord]) -> Self {
        let mut index = Self::default();
        let mut seen = HashSet::new();
        for word in words {
            let surface = word.text.trim().to_lowercase();
            if surface.is_empty() {
                continue;
            }
            let mut candidates = vec![surface.clone()];
            candidates.extend(
                generate_lemmas(&surface)
                    .into_iter()
                    .filter(|lemma| *lemma != surface),
            );
            for key in &candidates {
                if seen.insert(key.clone()) {
                    index.keys.push(key.clone());
                }
            }
            index.words.push((word.id, candidates));
        }
        index
    }

    /// Distinct keys in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[cfg(test)]
    fn candidates(&self, word_id: i64) -> &[String] {
        self.words
            .iter()
            .find(|(id, _)| *id == word_id)
            .map(|(_, c)| c.as_slice())
            .unwrap_or(&[])
    }

    /// First candidate of each word found in `hits`.
    pub fn resolve<'a>(
        &self,
        hits: &'a HashMap<String, DictionaryEntry>,
    ) -> Vec<(i64, &'a DictionaryEntry)> {
        self.words
            .iter()
            .filter_map(|(id, candidates)| {
                candidates
                    .iter()
                    .find_map(|key| hits.get(key))
                    .map(|entry| (*id, entry))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fill empty translations of up to `limit` words from dictionary entries
/// of their lemma candidates, querying `batch_size` keys at a time.
///
/// Returns the number of words updated. Words that gained a translation
/// since they were read are left alone.
pub fn backfill_by_inflection(store: &LexiconStore, limit: usize, batch_size: usize) -> Result<usize> {
    let pending = store.words_missing_translation(limit)?;
    if pending.is_empty() {
        return Ok(0);
    }

    let index = LemmaIndex::build(&pending);
    debug!(
        "Inflection index: {} words, {} lookup keys",
        pending.len(),
        index.len()
    );

    let mut hits = HashMap::new();
    for (n, chunk) in index.keys().chunks(batch_size.max(1)).enumerate() {
        for entry in store.dictionary_entries_for(chunk)? {
            hits.insert(entry.word.clone(), entry);
        }
        if (n + 1) % 10 == 0 {
            info!("Inflection backfill: {} chunks queried, {} hits", n + 1, hits.len());
        }
    }

    let mut updated = 0;
    for (word_id, entry) in index.resolve(&hits) {
        let formatted = format_translation(&entry.pos, &entry.translation);
        if store.fill_word_translation(
            word_id,
            &formatted,
            non_empty(&entry.phonetic),
            non_empty(&entry.pos),
        )? {
            updated += 1;
        }
    }

    Ok(updated)
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zhixie_store::NewWord;

    fn pending(id: i64, text: &str) -> PendingWord {
        PendingWord {
            id,
            text: text.to_string(),
        }
    }

    fn test_store() -> (LexiconStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LexiconStore::open(dir.path().join("zhixie.db")).unwrap();
        store
            .ensure_source("lexicon_test", "Test words", "lexicon_test")
            .unwrap();
        (store, dir)
    }

    fn entry(word: &str, translation: &str, pos: &str) -> DictionaryEntry {
        DictionaryEntry {
            word: word.into(),
            translation: translation.into(),
            pos: pos.into(),
            source: "ecdict".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_index_keys_and_candidates() {
        let index = LemmaIndex::build(&[pending(1, "Cats"), pending(2, "cat"), pending(3, "ab")]);
        assert_eq!(index.keys(), &["cats", "cat", "ab"]);
        assert_eq!(index.candidates(1), &["cats", "cat"]);
        assert_eq!(index.candidates(2), &["cat"]);
        assert!(index.candidates(4).is_empty());
    }

    #[test]
    fn test_index_skips_blank_words() {
        let index = LemmaIndex::build(&[pending(1, "  ")]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_shares_lemma_key() {
        let index = LemmaIndex::build(&[pending(1, "studies"), pending(2, "studied")]);
        assert_eq!(index.candidates(1)[0], "studies");
        assert_eq!(index.candidates(2)[0], "studied");
        assert!(index.candidates(1).iter().any(|c| c == "study"));
        assert!(index.candidates(2).iter().any(|c| c == "study"));
        assert_eq!(index.keys().iter().filter(|k| *k == "study").count(), 1);
    }

    #[test]
    fn test_backfill_by_inflection_fills_from_lemmas() {
        let (store, _dir) = test_store();
        for text in ["cities", "running", "zzz"] {
            store.upsert_word("lexicon_test", &NewWord::new(text, "")).unwrap();
        }
        store
            .upsert_dictionary_batch(&[
                DictionaryEntry {
                    phonetic: "'siti".into(),
                    ..entry("city", "城市", "n")
                },
                entry("run", "跑", "v"),
            ])
            .unwrap();

        // one key per query still reaches every hit
        assert_eq!(backfill_by_inflection(&store, 100, 1).unwrap(), 2);

        let cities = store.get_word("cities").unwrap().unwrap();
        assert_eq!(cities.translation.as_deref(), Some("n. 城市"));
        assert_eq!(cities.phonetic.as_deref(), Some("'siti"));
        assert_eq!(cities.part_of_speech.as_deref(), Some("n"));
        assert_eq!(
            store.get_word("running").unwrap().unwrap().translation.as_deref(),
            Some("v. 跑")
        );
        assert!(store.get_word("zzz").unwrap().unwrap().translation_is_empty());

        assert_eq!(backfill_by_inflection(&store, 100, 500).unwrap(), 0);
    }

    #[test]
    fn test_direct_form_preferred_over_lemma() {
        let (store, _dir) = test_store();
        store.upsert_word("lexicon_test", &NewWord::new("glasses", "")).unwrap();
        store
            .upsert_dictionary_batch(&[entry("glass", "玻璃", "n"), entry("glasses", "眼镜", "n")])
            .unwrap();

        assert_eq!(backfill_by_inflection(&store, 100, 500).unwrap(), 1);
        assert_eq!(
            store.get_word("glasses").unwrap().unwrap().translation.as_deref(),
            Some("n. 眼镜")
        );
    }

    #[test]
    fn test_own_form_wins_when_words_share_lemma() {
        // "studied" is read first, so "study" is an earlier key than "studies"
        for batch_size in [1, 2, 500] {
            let (store, _dir) = test_store();
            for text in ["studied", "studies"] {
                store.upsert_word("lexicon_test", &NewWord::new(text, "")).unwrap();
            }
            store
                .upsert_dictionary_batch(&[entry("study", "学习", "v"), entry("studies", "研究", "n")])
                .unwrap();
            assert_eq!(backfill_by_inflection(&store, 100, batch_size).unwrap(), 2);
            assert_eq!(
                store.get_word("studies").unwrap().unwrap().translation.as_deref(),
                Some("n. 研究"),
                "batch size {}",
                batch_size
            );
            assert_eq!(
                store.get_word("studied").unwrap().unwrap().translation.as_deref(),
                Some("v. 学习")
            );
        }
    }
}
