//! Zhixie Fetch: remote word lists over HTTP and the third-party
//! translation fallback.
//!
//! Importers and the backfill pipeline only see the [`Fetcher`] and
//! [`Translator`] traits, so jobs can run against the in-memory
//! implementations in [`memory`] without touching the network.

pub mod http;
pub mod memory;
pub mod translator;

pub use http::{Fetcher, HttpFetcher};
pub use memory::{StaticFetcher, StaticTranslator};
pub use translator::{parse_mymemory_body, MyMemoryTranslator, NoopTranslator, Translator};
