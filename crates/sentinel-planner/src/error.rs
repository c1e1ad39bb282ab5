use thiserror::Error;

/// Errors returned by the planning service client
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Request could not be sent or the response body could not be read
    #[error("planner request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Planner responded with a non-success status
    #[error("planner returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a JSON document
    #[error("failed to decode planner response: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("failed to build planner client: {0}")]
    Client(String),
}
