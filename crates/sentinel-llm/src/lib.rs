//! Chat-completion client for Sentinel's primary provider
//!
//! Sends a system + user message pair to an OpenAI-compatible endpoint
//! (Venice by default) and returns the first choice's message content.
//! Every way the call can go wrong collapses into [`LlmError`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod protocol;
pub mod provider;
pub mod types;

pub use error::LlmError;
pub use provider::{ChatProvider, venice::VeniceProvider};
pub use types::ChatRequest;
