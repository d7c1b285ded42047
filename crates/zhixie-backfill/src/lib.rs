//! Zhixie Backfill: fills missing word translations from the reference
//! dictionary, from dictionary entries of guessed base forms, and finally
//! from a third-party translation API.

pub mod inflection;
pub mod pipeline;
pub mod types;

pub use inflection::{backfill_by_inflection, LemmaIndex};
pub use pipeline::BackfillPipeline;
pub use types::*;
