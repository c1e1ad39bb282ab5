#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod planner;
pub mod primary;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use env::ExpandError;
pub use health::*;
pub use planner::*;
pub use primary::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level Sentinel configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat-completion provider tried first for every request
    #[serde(default)]
    pub primary: PrimaryConfig,
    /// Planning service used to build plans and as the fallback executor
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
