use serde::Deserialize;

use super::JSON_ONLY;
use crate::task::Task;

/// Body of `POST /translate-contract`
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationRequest {
    pub source_code: String,
    /// Target platform or language, e.g. `Rust (Solana)` or `Move`
    pub target_language: String,
}

impl Task for TranslationRequest {
    const NAME: &'static str = "translate-contract";
    const TEMPERATURE: f64 = 0.2;
    const MAX_TOKENS: u32 = 4000;

    fn system_instructions(&self) -> String {
        format!(
            "You are an expert smart contract engineer who ports contracts between blockchain \
             platforms while preserving their behavior and security properties. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Translate this smart contract to {target}:

{code}

Return a JSON object with:
- translated_code: the complete translated contract
- notes: array of notes about how constructs were mapped to {target}
- warnings: array of behaviors that could not be preserved exactly",
            target = self.target_language,
            code = self.source_code,
        )
    }

    fn source(&self) -> &str {
        &self.source_code
    }
}
