//! Third-party word translation.
//!
//! The `Translator` trait abstracts over the translation API used as the last
//! backfill fallback. Implementations:
//! - `MyMemoryTranslator`: MyMemory's free `get` endpoint (no key, rate limited)
//! - `NoopTranslator`: never returns a translation

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use zhixie_core::{Error, Result, TranslatorConfig};

/// Word translation backend.
pub trait Translator: Send + Sync {
    /// Translate a single word. `Ok(None)` means the service had no answer.
    fn translate(&self, word: &str) -> Result<Option<String>>;

    /// Whether this backend can produce translations at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Translator that never answers.
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, _word: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Client for `https://api.mymemory.translated.net/get`.
pub struct MyMemoryTranslator {
    client: Client,
    config: TranslatorConfig,
    timeout: Duration,
}

impl MyMemoryTranslator {
    pub fn new(client: Client, config: TranslatorConfig, timeout: Duration) -> Self {
        Self {
            client,
            config,
            timeout,
        }
    }
}

impl Translator for MyMemoryTranslator {
    fn translate(&self, word: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", word), ("langpair", self.config.langpair.as_str())])
            .timeout(self.timeout)
            .send()
            .map_err(|e| Error::Http(format!("Translation request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "Translation API returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| Error::Http(format!("Reading translation body failed: {}", e)))?;
        let translated = parse_mymemory_body(&body)?;
        debug!("MyMemory {:?} -> {:?}", word, translated);
        Ok(translated)
    }
}

/// Extract `responseData.translatedText` from a MyMemory response body.
///
/// A missing or blank field is `Ok(None)`; a body that is not JSON is an error.
pub fn parse_mymemory_body(body: &str) -> Result<Option<String>> {
    let value: Value = serde_json::from_str(body)?;
    let translated = value
        .get("responseData")
        .and_then(|data| data.get("translatedText"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);
    Ok(translated)
}
