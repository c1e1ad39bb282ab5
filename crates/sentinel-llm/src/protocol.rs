//! OpenAI-compatible chat completion wire format

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::ChatRequest;

// -- Request types --

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Venice-only extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venice_parameters: Option<VeniceParameters>,
}

/// Venice request extensions
#[derive(Debug, Clone, Serialize)]
pub struct VeniceParameters {
    /// Whether Venice prepends its own system prompt
    pub include_venice_system_prompt: bool,
}

/// Message within a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

impl ChatCompletionRequest {
    /// Build the wire request for `model`
    pub fn new(model: &str, request: &ChatRequest) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![
                ChatMessage::system(request.system.as_str()),
                ChatMessage::user(request.user.as_str()),
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            venice_parameters: None,
        }
    }
}

// -- Response types --

/// Chat completion response body
///
/// Only the fields Sentinel reads are modelled; the rest is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice
    ///
    /// # Errors
    ///
    /// `EmptyChoices` if there are no choices, `MissingContent` if the first
    /// choice carries no (or empty) message text
    pub fn into_content(self) -> Result<String, LlmError> {
        let choice = self.choices.into_iter().next().ok_or(LlmError::EmptyChoices)?;

        choice
            .message
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::MissingContent)
    }
}
