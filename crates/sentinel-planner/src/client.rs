use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sentinel_config::PlannerConfig;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::PlannerError;
use crate::types::{Plan, PlanRun};
use crate::Planner;

/// Async HTTP client for the Portia planning API
///
/// `POST {base}/plans` builds a plan from `{query}`;
/// `POST {base}/plan-runs` executes `{plan}`.
#[derive(Clone)]
pub struct PortiaClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct PlanRequest<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct RunRequest<'a> {
    plan: &'a Plan,
}

impl PortiaClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build().map_err(|e| PlannerError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value, PlannerError> {
        let mut request = self.http.post(self.endpoint(path)).json(body);

        if let Some(key) = &self.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Api-Key {}", key.expose_secret()));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%status, path, "planner returned error");
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| PlannerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Planner for PortiaClient {
    async fn plan(&self, query: &str) -> Result<Plan, PlannerError> {
        let value = self.post("plans", &PlanRequest { query }).await?;
        let plan = Plan::new(value);

        tracing::debug!(plan_id = plan.id().unwrap_or("-"), steps = plan.step_count().unwrap_or(0), "plan created");

        Ok(plan)
    }

    async fn run_plan(&self, plan: &Plan) -> Result<PlanRun, PlannerError> {
        let value = self.post("plan-runs", &RunRequest { plan }).await?;
        let run = PlanRun::new(value);

        tracing::debug!(
            plan_id = plan.id().unwrap_or("-"),
            state = run.state().unwrap_or("-"),
            "plan run finished"
        );

        Ok(run)
    }
}
