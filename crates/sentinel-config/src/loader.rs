use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a provider section holds values that can never work
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_primary()?;
        self.validate_planner()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if !health.enabled {
            return Ok(());
        }

        // `/` is taken by the banner route
        if !health.path.starts_with('/') || health.path == "/" {
            anyhow::bail!(
                "server.health.path must start with '/' and name a route other than '/', got {:?}",
                health.path
            );
        }

        Ok(())
    }

    fn validate_primary(&self) -> anyhow::Result<()> {
        if self.primary.model.trim().is_empty() {
            anyhow::bail!("primary.model must not be empty");
        }

        if self.primary.timeout_seconds == Some(0) {
            anyhow::bail!("primary.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_planner(&self) -> anyhow::Result<()> {
        if self.planner.timeout_seconds == Some(0) {
            anyhow::bail!("planner.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(rate) = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate)
        else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        Ok(())
    }
}
