use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Venice API base URL
pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://api.venice.ai/api/v1";

/// Default chat model
pub const DEFAULT_PRIMARY_MODEL: &str = "llama-3.3-70b";

/// Chat-completion provider configuration
///
/// Any OpenAI-compatible endpoint works; `/chat/completions` is appended
/// to `base_url`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryConfig {
    /// Bearer token sent with every request
    #[serde(default, deserialize_with = "crate::planner::non_empty_secret")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    #[serde(default = "default_model")]
    pub model: String,
    /// Whole-request timeout; unset means the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_PRIMARY_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    DEFAULT_PRIMARY_MODEL.to_owned()
}
