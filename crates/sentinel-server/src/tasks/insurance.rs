use serde::Deserialize;

use super::JSON_ONLY;
use crate::task::Task;

/// Body of `POST /assess-insurance`
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceRequest {
    pub contract_code: String,
    /// Total value locked in the contract, in USD
    pub tvl: f64,
}

impl Task for InsuranceRequest {
    const NAME: &'static str = "assess-insurance";
    const TEMPERATURE: f64 = 0.3;
    const MAX_TOKENS: u32 = 1500;

    fn system_instructions(&self) -> String {
        format!(
            "You are a DeFi insurance underwriter who prices smart contract cover from the \
             contract's code and the value it secures. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Assess the insurance risk of this smart contract, which currently holds a total value \
             locked of ${tvl} USD:

{code}

Return a JSON object with:
- risk_score: a number between 0-100, higher meaning riskier
- premium_percentage: suggested annual premium as a percentage of covered value
- coverage_recommendation: recommended coverage amount and terms
- risk_factors: array of the factors that drive the score",
            tvl = self.tvl,
            code = self.contract_code,
        )
    }

    fn source(&self) -> &str {
        &self.contract_code
    }
}
