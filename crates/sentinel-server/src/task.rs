use serde::de::DeserializeOwned;

use crate::invoker::Prompt;

/// Request body of one analysis endpoint
///
/// Each implementation owns its prompt wording and sampling budget; the
/// invocation itself is shared.
pub trait Task: DeserializeOwned + Send + 'static {
    /// Endpoint name, also the route path without its leading slash
    const NAME: &'static str;
    const TEMPERATURE: f64;
    const MAX_TOKENS: u32;

    fn system_instructions(&self) -> String;

    fn user_prompt(&self) -> String;

    /// Contract source carried by the request, for request logging
    fn source(&self) -> &str;

    fn prompt(&self) -> Prompt {
        Prompt {
            task: Self::NAME,
            system: self.system_instructions(),
            user: self.user_prompt(),
            temperature: Self::TEMPERATURE,
            max_tokens: Self::MAX_TOKENS,
        }
    }
}
