//! Heuristic base-form guessing for inflected English words.
//!
//! Produces extra dictionary lookup keys for a surface form (plurals, third
//! person, past tense, gerunds, comparatives, superlatives). Guesses are
//! approximate; a wrong one is just a dictionary miss.

/// Maximum number of candidates returned for one word.
pub const MAX_LEMMAS: usize = 6;

/// Generate candidate lemmas for a lowercase word, in rule order.
///
/// Candidates are distinct, never equal to the input, never empty, and at
/// most [`MAX_LEMMAS`] long. Words of two characters or fewer yield nothing.
pub fn generate_lemmas(word: &str) -> Vec<String> {
    let w = word.trim().to_lowercase();
    let len = w.chars().count();
    if len <= 2 {
        return Vec::new();
    }

    let mut out = Candidates::new(&w);

    // plural / third person
    if len > 4 {
        if let Some(stem) = w.strip_suffix("ies") {
            out.add(format!("{}y", stem));
        }
    }
    if len > 3 {
        if let Some(stem) = w.strip_suffix("es") {
            out.add(stem);
        }
    }
    if len > 3 && !w.ends_with("ss") {
        if let Some(stem) = w.strip_suffix('s') {
            out.add(stem);
        }
    }

    // past tense
    if len > 4 {
        if let Some(stem) = w.strip_suffix("ied") {
            out.add(format!("{}y", stem));
        }
    }
    if len > 3 {
        if let Some(stem) = w.strip_suffix("ed") {
            out.add(stem);
            if len > 5 && w.ends_with("pped") {
                out.add(drop_last(stem));
            }
        }
    }

    // gerund
    if len > 5 {
        if let Some(base) = w.strip_suffix("ing") {
            out.add(base);
            out.add(format!("{}e", base));
            if let Some(undoubled) = undouble(base) {
                out.add(undoubled);
            }
        }
    }

    // comparative / superlative
    if len > 4 {
        if let Some(stem) = w.strip_suffix("ier") {
            out.add(format!("{}y", stem));
        }
    }
    if len > 5 {
        if let Some(stem) = w.strip_suffix("iest") {
            out.add(format!("{}y", stem));
        }
    }
    if len > 4 {
        if let Some(stem) = w.strip_suffix("er") {
            out.add(stem);
            if let Some(undoubled) = undouble(stem) {
                out.add(undoubled);
            }
        }
    }
    if len > 5 {
        if let Some(stem) = w.strip_suffix("est") {
            out.add(stem);
            if let Some(undoubled) = undouble(stem) {
                out.add(undoubled);
            }
        }
    }

    out.finish()
}

/// `stem` without its final character when that character is doubled
/// (`runn` → `run`, `bigg` → `big`).
fn undouble(stem: &str) -> Option<&str> {
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), Some(prev)) if last == prev => Some(drop_last(stem)),
        _ => None,
    }
}

fn drop_last(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Ordered, de-duplicated candidate accumulator.
struct Candidates<'a> {
    input: &'a str,
    items: Vec<String>,
}

impl<'a> Candidates<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            items: Vec::new(),
        }
    }

    fn add(&mut self, candidate: impl AsRef<str>) {
        let candidate = candidate.as_ref().trim().to_lowercase();
        if candidate.is_empty() || candidate == self.input || self.items.contains(&candidate) {
            return;
        }
        self.items.push(candidate);
    }

    fn finish(mut self) -> Vec<String> {
        self.items.truncate(MAX_LEMMAS);
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn has(word: &str, lemma: &str) -> bool {
        generate_lemmas(word).iter().any(|l| l == lemma)
    }

    #[test]
    fn test_short_words_yield_nothing() {
        for word in ["", "a", "is", "as", "  "] {
            assert!(generate_lemmas(word).is_empty(), "{:?}", word);
        }
    }

    #[test]
    fn test_known_forms() {
        assert!(has("cats", "cat"));
        assert!(has("cities", "city"));
        assert!(has("studied", "study"));
        assert!(has("running", "run"));
        assert!(has("happiest", "happy"));
        assert!(has("bigger", "big"));
        assert!(has("biggest", "big"));
        assert!(has("happier", "happy"));
        assert!(has("boxes", "box"));
        assert!(has("goes", "go"));
        assert!(has("worked", "work"));
        assert!(has("stopped", "stop"));
        assert!(has("making", "make"));
        assert!(has("studies", "study"));
    }

    #[test]
    fn test_candidate_order() {
        assert_eq!(generate_lemmas("cities"), vec!["city", "citi", "citie"]);
        assert_eq!(generate_lemmas("running"), vec!["runn", "runne", "run"]);
        assert_eq!(generate_lemmas("bigger"), vec!["bigg", "big"]);
        assert_eq!(generate_lemmas("happiest"), vec!["happy", "happi"]);
        assert_eq!(generate_lemmas("stopped"), vec!["stopp", "stop"]);
    }

    #[test]
    fn test_length_guards() {
        // "ies" needs more than four characters; "es" and "s" need more than three
        assert_eq!(generate_lemmas("ties"), vec!["ti", "tie"]);
        assert!(generate_lemmas("yes").is_empty());
        // "ing" needs more than five characters
        assert!(generate_lemmas("sing").is_empty());
        assert!(generate_lemmas("bring").is_empty());
        // "er" needs more than four characters
        assert!(generate_lemmas("over").is_empty());
        // "est" needs more than five characters
        assert_eq!(generate_lemmas("nest"), Vec::<String>::new());
    }

    #[test]
    fn test_double_s_not_stripped() {
        assert!(generate_lemmas("class").is_empty());
        assert!(!has("glass", "glas"));
    }

    #[test]
    fn test_input_is_normalized() {
        assert_eq!(generate_lemmas("  Cats "), vec!["cat"]);
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        let _ = generate_lemmas("café");
        let _ = generate_lemmas("naïveer");
        let _ = generate_lemmas("ééest");
        assert!(has("résumés", "résumé"));
    }

    #[test]
    fn test_uninflected_word() {
        assert!(generate_lemmas("apple").is_empty());
    }

    proptest! {
        #[test]
        fn prop_candidates_are_well_formed(word in "[a-z]{0,12}") {
            let lemmas = generate_lemmas(&word);
            prop_assert!(lemmas.len() <= MAX_LEMMAS);
            for (i, lemma) in lemmas.iter().enumerate() {
                prop_assert!(!lemma.is_empty());
                prop_assert_ne!(lemma, &word);
                prop_assert!(!lemmas[..i].contains(lemma));
            }
        }

        #[test]
        fn prop_short_inputs_are_empty(word in "[a-z]{0,2}") {
            prop_assert!(generate_lemmas(&word).is_empty());
        }

        #[test]
        fn prop_never_panics_on_unicode(word in "\\PC{0,10}") {
            let _ = generate_lemmas(&word);
        }
    }
}
