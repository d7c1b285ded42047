//! Translation display formatting and the acceptance filter for
//! third-party translation responses.

/// Display string for a dictionary translation: `"<pos>. <translation>"`
/// when a part of speech is present, else the bare translation.
pub fn format_translation(pos: &str, translation: &str) -> String {
    let pos = pos.trim();
    if pos.is_empty() {
        translation.to_string()
    } else {
        format!("{}. {}", pos, translation)
    }
}

/// Whether a translation API answer is worth storing for `word`.
///
/// Rejects empty answers and answers that just echo the word back
/// (case-insensitively). Accepts anything containing a CJK ideograph, and
/// pure-ASCII answers such as acronyms (`NGC-1`, `IEEE 1394`). Mixed
/// non-CJK, non-ASCII output is rejected.
pub fn accept_translation(word: &str, translated: &str) -> bool {
    let word = word.trim().to_lowercase();
    let translated = translated.trim();
    if word.is_empty() || translated.is_empty() {
        return false;
    }
    if translated.to_lowercase() == word {
        return false;
    }

    if translated.chars().any(is_cjk_ideograph) {
        return true;
    }

    translated.is_ascii()
}

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}
