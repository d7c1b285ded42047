//! Blocking HTTP GET for plain-text lists, JSON documents and CSV streams.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use zhixie_core::{Error, Result};

/// Source of remote documents.
///
/// Every failure to obtain a body (network error, non-success status,
/// timeout) is reported as [`Error::Http`] so callers can tell it apart
/// from a body that fails to parse.
pub trait Fetcher: Send + Sync {
    /// Fetch a whole document as text.
    fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;

    /// Open a document as a byte stream, for bodies too large to buffer.
    fn open_stream(&self, url: &str, timeout: Duration) -> Result<Box<dyn Read + Send>>;
}

/// [`Fetcher`] backed by a blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("zhixie/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::blocking::Response> {
        debug!("GET {} (timeout {:?})", url, timeout);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| Error::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("GET {} returned {}", url, status)));
        }
        Ok(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        self.get(url, timeout)?
            .text()
            .map_err(|e| Error::Http(format!("Reading body of {} failed: {}", url, e)))
    }

    fn open_stream(&self, url: &str, timeout: Duration) -> Result<Box<dyn Read + Send>> {
        let response = self.get(url, timeout)?;
        Ok(Box::new(response))
    }
}
