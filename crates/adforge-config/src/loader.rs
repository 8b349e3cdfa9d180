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

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured, a duration string
    /// does not parse, or a poll ceiling is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_providers()?;
        self.validate_durations()?;
        Ok(())
    }

    /// Ensure at least one image generation provider is configured
    fn validate_has_providers(&self) -> anyhow::Result<()> {
        if self.providers.fal.is_none() && self.providers.freepik.is_none() {
            anyhow::bail!("at least one image generation provider must be configured (fal or freepik)");
        }

        Ok(())
    }

    /// Ensure duration strings parse and poll ceilings are positive
    fn validate_durations(&self) -> anyhow::Result<()> {
        if let Some(ref fal) = self.providers.fal {
            duration_str::parse(&fal.poll_interval)
                .map_err(|e| anyhow::anyhow!("invalid fal poll_interval '{}': {e}", fal.poll_interval))?;

            if fal.max_poll_attempts == 0 {
                anyhow::bail!("fal max_poll_attempts must be greater than 0");
            }
        }

        duration_str::parse(&self.batch.item_delay)
            .map_err(|e| anyhow::anyhow!("invalid batch item_delay '{}': {e}", self.batch.item_delay))?;

        Ok(())
    }
}
