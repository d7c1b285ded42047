//! Backfill types.

use serde::Serialize;

/// Result of running the backfill pipeline.
///
/// Optional counters are `None` when their pass was not enabled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BackfillReport {
    #[serde(rename = "dictionaryFilled")]
    pub dictionary_filled: usize,
    #[serde(rename = "formatUpgraded", skip_serializing_if = "Option::is_none")]
    pub format_upgraded: Option<usize>,
    #[serde(rename = "inflectionFilled", skip_serializing_if = "Option::is_none")]
    pub inflection_filled: Option<usize>,
    #[serde(rename = "translatorFilled", skip_serializing_if = "Option::is_none")]
    pub translator_filled: Option<usize>,
    #[serde(rename = "remainingEmpty")]
    pub remaining_empty: i64,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl BackfillReport {
    /// Translations written or rewritten across all passes.
    pub fn total_updated(&self) -> usize {
        self.dictionary_filled
            + self.format_upgraded.unwrap_or(0)
            + self.inflection_filled.unwrap_or(0)
            + self.translator_filled.unwrap_or(0)
    }
}
