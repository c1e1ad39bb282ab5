/// Provider-independent chat request
///
/// The model is chosen by the provider's configuration, not per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System instructions
    pub system: String,
    /// User prompt
    pub user: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}
