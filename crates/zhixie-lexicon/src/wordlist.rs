//! Plain-text word lists: one word per line.

use once_cell::sync::Lazy;
use regex::Regex;

// Lowercase letters only, reasonable word length.
static FREQUENCY_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2,20}$").unwrap());

/// Parse a frequency-ranked list, keeping only plain lowercase words of
/// 2–20 letters. Stops after `limit` words when `limit` is non-zero.
pub fn parse_frequency_list(body: &str, limit: usize) -> Vec<String> {
    let words = body
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|w| FREQUENCY_WORD_RE.is_match(w));
    if limit > 0 {
        words.take(limit).collect()
    } else {
        words.collect()
    }
}

/// Parse a raw vocabulary list: non-empty lines starting with a letter, lowercased.
pub fn parse_plain_word_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}
