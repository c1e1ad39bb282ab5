use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default planning service base URL
pub const DEFAULT_PLANNER_BASE_URL: &str = "https://api.portialabs.ai/api/v0";

/// Planning service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    /// Sent as `Authorization: Api-Key <key>` when present
    #[serde(default, deserialize_with = "non_empty_secret")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Whole-request timeout; unset means the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_PLANNER_BASE_URL).expect("valid default URL")
}

/// Treat `api_key = ""` (an unset variable with an empty default) as absent
pub(crate) fn non_empty_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|key| !key.is_empty()).map(SecretString::from))
}
