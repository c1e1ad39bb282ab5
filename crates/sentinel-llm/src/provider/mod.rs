//! Provider trait and the HTTP implementation

pub mod venice;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::ChatRequest;

/// Chat-completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send one request and return the first choice's message content
    ///
    /// Exactly one upstream attempt is made.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Build the shared HTTP client, applying a whole-request timeout if set
pub(crate) fn http_client(timeout_seconds: Option<u64>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();

    if let Some(seconds) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    builder
        .build()
        .map_err(|e| LlmError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))
}
