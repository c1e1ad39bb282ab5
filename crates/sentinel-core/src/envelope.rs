//! Response envelope shared by every analysis endpoint

use serde::Serialize;
use serde_json::{Value, json};

use crate::extract::{ExtractedPayload, summarize};

/// Characters of model output kept in the envelope summary
pub const SUMMARY_LIMIT: usize = 500;

/// Which provider produced the envelope's results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderUsed {
    /// Chat-completion provider answered
    Primary,
    /// Planner executed the plan itself
    Secondary,
}

/// Envelope for a request that produced results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedEnvelope {
    /// Plan built before any provider was tried
    pub plan: Value,
    pub results: Value,
    /// Extracted payload, only present when the primary provider answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_analysis: Option<Value>,
    pub provider_used: ProviderUsed,
    /// Mirrors `provider_used == primary` for older clients
    pub venice_used: bool,
}

/// Body returned by every analysis endpoint
///
/// Failures are reported in-band as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Completed(Box<CompletedEnvelope>),
    Error { error: String },
}

impl ResponseEnvelope {
    /// Envelope for an answer from the primary provider
    ///
    /// `content` is the raw message text the payload was extracted from.
    pub fn primary(plan: Value, payload: ExtractedPayload, content: &str) -> Self {
        let payload = payload.into_value();
        let results = json!({
            "state": "COMPLETE",
            "outputs": {
                "final_output": {
                    "value": payload,
                    "summary": summarize(content, SUMMARY_LIMIT),
                }
            }
        });

        Self::Completed(Box::new(CompletedEnvelope {
            plan,
            results,
            structured_analysis: Some(payload),
            provider_used: ProviderUsed::Primary,
            venice_used: true,
        }))
    }

    /// Envelope carrying the planner's own run result unchanged
    pub fn secondary(plan: Value, run: Value) -> Self {
        Self::Completed(Box::new(CompletedEnvelope {
            plan,
            results: run,
            structured_analysis: None,
            provider_used: ProviderUsed::Secondary,
            venice_used: false,
        }))
    }

    /// Error envelope
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error: message.into() }
    }

    /// Provider that produced the results, `None` for errors
    pub fn provider_used(&self) -> Option<ProviderUsed> {
        match self {
            Self::Completed(envelope) => Some(envelope.provider_used),
            Self::Error { .. } => None,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
