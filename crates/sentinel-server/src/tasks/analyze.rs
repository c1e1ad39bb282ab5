use serde::Deserialize;

use super::JSON_ONLY;
use crate::task::Task;

/// Body of `POST /analyze-contract`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub contract_code: String,
}

impl Task for AnalysisRequest {
    const NAME: &'static str = "analyze-contract";
    const TEMPERATURE: f64 = 0.2;
    const MAX_TOKENS: u32 = 2000;

    fn system_instructions(&self) -> String {
        format!(
            "You are an expert smart contract security auditor. You review Solidity and other \
             smart contract code for vulnerabilities and deviations from best practices. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Analyze this smart contract for security vulnerabilities and best practices:

{}

Generate a comprehensive security analysis with the following structure:
- overall_score: a number between 0-100 representing the security score
- complexity: analysis with score, details array, and risk_level
- vulnerabilities: analysis with score, details array, and risk_level
- upgradability: analysis with score, details array, and risk_level
- behavior: analysis with score, details array, and risk_level

Focus on important security aspects like reentrancy, overflow/underflow and access control.",
            self.contract_code
        )
    }

    fn source(&self) -> &str {
        &self.contract_code
    }
}
