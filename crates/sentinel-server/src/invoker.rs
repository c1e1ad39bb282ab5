//! Primary/fallback invocation shared by every analysis endpoint

use std::sync::Arc;

use sentinel_config::Config;
use sentinel_core::{ResponseEnvelope, extract};
use sentinel_llm::{ChatProvider, ChatRequest, VeniceProvider};
use sentinel_planner::{Planner, PlannerError, PortiaClient};
use thiserror::Error;

/// Everything one invocation needs from an endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Endpoint name, used in log fields only
    pub task: &'static str,
    pub system: String,
    /// Sent to the primary provider and used as the planner query
    pub user: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Failures that end an invocation with an error envelope
///
/// Primary provider failures never appear here; they trigger the fallback.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Planner could not build a plan
    #[error(transparent)]
    Plan(PlannerError),

    /// Fallback plan execution failed
    #[error(transparent)]
    Run(PlannerError),
}

impl InvokeError {
    const fn stage(&self) -> &'static str {
        match self {
            Self::Plan(_) => "plan",
            Self::Run(_) => "run_plan",
        }
    }
}

/// Plans with the planner, answers with the primary provider, and falls
/// back to executing the plan when the primary provider is unusable
#[derive(Clone)]
pub struct Invoker {
    primary: Arc<dyn ChatProvider>,
    planner: Arc<dyn Planner>,
}

impl Invoker {
    pub fn new(primary: Arc<dyn ChatProvider>, planner: Arc<dyn Planner>) -> Self {
        Self { primary, planner }
    }

    /// Build the HTTP-backed providers described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if config.primary.api_key.is_none() {
            tracing::warn!("no primary API key configured; requests will likely be served by the planner");
        }

        let primary = VeniceProvider::new("venice", &config.primary)?;
        let planner = PortiaClient::new(&config.planner)?;

        tracing::info!(
            model = primary.model(),
            primary = %config.primary.base_url,
            planner = %config.planner.base_url,
            "providers initialized"
        );

        Ok(Self::new(Arc::new(primary), Arc::new(planner)))
    }

    /// Run one invocation; failures come back as an error envelope
    pub async fn invoke(&self, prompt: &Prompt) -> ResponseEnvelope {
        match self.try_invoke(prompt).await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(task = prompt.task, stage = e.stage(), error = %e, "invocation failed");
                ResponseEnvelope::error(e.to_string())
            }
        }
    }

    async fn try_invoke(&self, prompt: &Prompt) -> Result<ResponseEnvelope, InvokeError> {
        // The plan is part of every envelope, whichever provider answers
        let plan = self.planner.plan(&prompt.user).await.map_err(InvokeError::Plan)?;

        let request = ChatRequest {
            system: prompt.system.clone(),
            user: prompt.user.clone(),
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };

        match self.primary.complete(&request).await {
            Ok(content) => {
                let payload = extract(&content);
                tracing::info!(
                    task = prompt.task,
                    provider = self.primary.name(),
                    extracted_json = payload.is_json(),
                    "primary provider answered"
                );
                Ok(ResponseEnvelope::primary(plan.into_value(), payload, &content))
            }
            Err(e) => {
                tracing::warn!(
                    task = prompt.task,
                    provider = self.primary.name(),
                    kind = e.kind(),
                    error = %e,
                    "primary provider unusable, running plan"
                );

                let run = self.planner.run_plan(&plan).await.map_err(InvokeError::Run)?;
                tracing::info!(
                    task = prompt.task,
                    state = run.state().unwrap_or("-"),
                    has_output = run.final_output().is_some(),
                    "planner fallback completed"
                );
                Ok(ResponseEnvelope::secondary(plan.into_value(), run.into_value()))
            }
        }
    }
}
