//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use sentinel_config::{Config, CorsConfig, HealthConfig, PlannerConfig, PrimaryConfig, ServerConfig};
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// Upstreams point at a closed local port until configured.
    pub fn new() -> Self {
        let unreachable = unreachable_url();

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    ..ServerConfig::default()
                },
                primary: PrimaryConfig {
                    api_key: Some(SecretString::from("venice-test-key")),
                    base_url: unreachable.clone(),
                    timeout_seconds: Some(5),
                    ..PrimaryConfig::default()
                },
                planner: PlannerConfig {
                    api_key: Some(SecretString::from("portia-test-key")),
                    base_url: unreachable,
                    timeout_seconds: Some(5),
                },
                telemetry: None,
            },
        }
    }

    /// Point the primary provider at a mock backend
    pub fn with_primary(mut self, base_url: &str) -> Self {
        self.config.primary.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Limit how long the primary provider may take to answer
    pub fn with_primary_timeout(mut self, seconds: u64) -> Self {
        self.config.primary.timeout_seconds = Some(seconds);
        self
    }

    /// Point the planner at a mock backend
    pub fn with_planner(mut self, base_url: &str) -> Self {
        self.config.planner.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Serve the health check on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

/// URL of a local port nothing listens on
///
/// Connections are refused immediately.
pub fn unreachable_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);

    Url::parse(&format!("http://{addr}/v1")).expect("valid URL")
}
