//! Zhixie Ingest: import jobs that populate the store from public word
//! lists: built-in seed levels, the graded level crawl, and the ECDICT
//! dictionary sync.
//!
//! Each job fetches, parses and upserts. A source that cannot be fetched is
//! logged and skipped; a source that cannot be parsed aborts the job.

pub mod crawl;
pub mod dictionary;
pub mod seed;
pub mod types;

pub use crawl::run_crawl;
pub use dictionary::sync_dictionary;
pub use seed::run_seed;
pub use types::*;

use tracing::warn;
use zhixie_core::Result;

/// Imported words between progress log lines.
pub(crate) const PROGRESS_EVERY: usize = 1000;

/// Turn a fetch failure into `None` so the caller can skip the source.
/// Any other error is passed through.
pub(crate) fn tolerate_fetch<T>(source: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_fetch_failure() => {
            warn!("Fetch for {} failed, skipping: {}", source, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
