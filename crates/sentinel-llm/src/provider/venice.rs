//! Venice (OpenAI-compatible) chat provider

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sentinel_config::PrimaryConfig;
use url::Url;

use super::ChatProvider;
use crate::error::LlmError;
use crate::protocol::{ChatCompletionRequest, ChatCompletionResponse, VeniceParameters};
use crate::types::ChatRequest;

/// Whether the base URL is the hosted Venice API (vs a compatible third-party)
fn is_hosted_venice(base_url: &Url) -> bool {
    base_url.host_str().is_some_and(|h| h == "api.venice.ai")
}

/// Chat provider speaking the OpenAI chat completion protocol
pub struct VeniceProvider {
    name: String,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
    model: String,
}

impl VeniceProvider {
    /// Create from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Internal` if the HTTP client cannot be built
    pub fn new(name: impl Into<String>, config: &PrimaryConfig) -> Result<Self, LlmError> {
        Ok(Self {
            name: name.into(),
            client: super::http_client(config.timeout_seconds)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Model sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    fn wire_request(&self, request: &ChatRequest) -> ChatCompletionRequest {
        let mut wire = ChatCompletionRequest::new(&self.model, request);

        // Only the hosted API understands this extension; our own system
        // prompt must be the only one
        if is_hosted_venice(&self.base_url) {
            wire.venice_parameters = Some(VeniceParameters {
                include_venice_system_prompt: false,
            });
        }

        wire
    }
}

#[async_trait]
impl ChatProvider for VeniceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let wire_request = self.wire_request(request);

        let mut builder = self.client.post(self.completions_url()).json(&wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(provider = %self.name, error = %e, "upstream request failed");
            LlmError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                provider = %self.name,
                status = %status,
                "upstream returned error"
            );
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let wire_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            provider = %self.name,
            model = wire_response.model.as_deref().unwrap_or(&self.model),
            id = wire_response.id.as_deref().unwrap_or_default(),
            finish_reason = wire_response
                .choices
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("-"),
            "chat completion received"
        );

        wire_response.into_content()
    }
}
