//! Request bodies and prompts for the four analysis endpoints

mod analyze;
mod insurance;
mod recommend;
mod translate;

pub use analyze::AnalysisRequest;
pub use insurance::InsuranceRequest;
pub use recommend::RecommendationRequest;
pub use translate::TranslationRequest;

/// Reminder appended to every system prompt
const JSON_ONLY: &str = "Respond with a single JSON object and nothing else. Do not wrap it in prose.";
