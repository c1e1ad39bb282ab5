use serde::Deserialize;
use serde_json::{Map, Value};

use super::JSON_ONLY;
use crate::task::Task;

/// Body of `POST /generate-recommendation`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub contract_code: String,
    /// Result of an earlier analysis, passed back verbatim
    pub analysis: Map<String, Value>,
}

impl Task for RecommendationRequest {
    const NAME: &'static str = "generate-recommendation";
    const TEMPERATURE: f64 = 0.5;
    const MAX_TOKENS: u32 = 2000;

    fn system_instructions(&self) -> String {
        format!(
            "You are a senior smart contract security consultant who turns audit findings into \
             concrete, prioritized fixes. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        // A map of JSON values always serializes
        let analysis = serde_json::to_string_pretty(&self.analysis).unwrap_or_default();

        format!(
            "Given this smart contract:

{code}

and this prior security analysis of it:

{analysis}

Return a JSON object with:
- recommendations: array of objects, each with title, description, priority (high, medium or low) \
and code_example
- summary: a short overview of the most important changes",
            code = self.contract_code,
        )
    }

    fn source(&self) -> &str {
        &self.contract_code
    }
}
