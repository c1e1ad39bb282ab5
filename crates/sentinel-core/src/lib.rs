//! Shared data model for Sentinel
//!
//! Holds the response envelope every endpoint returns and the best-effort
//! extraction of JSON documents embedded in free-form model output.

#![allow(clippy::must_use_candidate)]

pub mod envelope;
pub mod extract;

pub use envelope::{CompletedEnvelope, ProviderUsed, ResponseEnvelope, SUMMARY_LIMIT};
pub use extract::{ExtractedPayload, extract, summarize};
