//! In-memory fetcher and translator, for offline runs and tests.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::time::Duration;

use parking_lot::Mutex;

use crate::http::Fetcher;
use crate::translator::Translator;
use zhixie_core::{Error, Result};

/// [`Fetcher`] serving fixed bodies by URL. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn lookup(&self, url: &str) -> Result<String> {
        self.requests.lock().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Http(format!("GET {} returned 404 Not Found", url)))
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_text(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.lookup(url)
    }

    fn open_stream(&self, url: &str, _timeout: Duration) -> Result<Box<dyn Read + Send>> {
        let body = self.lookup(url)?;
        Ok(Box::new(Cursor::new(body.into_bytes())))
    }
}

/// [`Translator`] answering from a fixed table. Words listed as failing
/// return an HTTP error; other unknown words get no answer.
#[derive(Default)]
pub struct StaticTranslator {
    answers: HashMap<String, String>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: impl Into<String>, translation: impl Into<String>) -> Self {
        self.answers.insert(word.into(), translation.into());
        self
    }

    pub fn failing_on(mut self, word: impl Into<String>) -> Self {
        self.failing.push(word.into());
        self
    }

    /// Words passed to `translate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, word: &str) -> Result<Option<String>> {
        self.calls.lock().push(word.to_string());
        if self.failing.iter().any(|w| w == word) {
            return Err(Error::Http(format!("translation of {} timed out", word)));
        }
        Ok(self.answers.get(word).cloned())
    }
}
