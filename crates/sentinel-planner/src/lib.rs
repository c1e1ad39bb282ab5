//! Client for the agent planning service
//!
//! The planner turns a natural-language query into a [`Plan`] and can
//! execute that plan with its own engine, producing a [`PlanRun`]. Both are
//! opaque JSON documents that Sentinel passes through unchanged.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::PortiaClient;
pub use error::PlannerError;
pub use types::{Plan, PlanRun};

/// Planning and plan-execution backend
#[async_trait]
pub trait Planner: Send + Sync {
    /// Build a plan for `query`
    async fn plan(&self, query: &str) -> Result<Plan, PlannerError>;

    /// Execute a previously built plan
    async fn run_plan(&self, plan: &Plan) -> Result<PlanRun, PlannerError>;
}
