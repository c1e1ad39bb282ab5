use thiserror::Error;

/// Errors that can occur while calling the chat-completion provider
///
/// Callers treat every variant the same way; the distinction only feeds
/// logging.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Request never produced a response (connect, TLS, timeout)
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a chat-completion envelope
    #[error("failed to parse response: {0}")]
    InvalidResponse(String),

    /// Envelope had an empty `choices` list
    #[error("response contained no choices")]
    EmptyChoices,

    /// First choice had no message text
    #[error("response choice had no message content")]
    MissingContent,

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LlmError {
    /// Short machine-readable label for log fields
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::InvalidResponse(_) => "invalid_response",
            Self::EmptyChoices => "empty_choices",
            Self::MissingContent => "missing_content",
            Self::Internal(_) => "internal",
        }
    }
}
