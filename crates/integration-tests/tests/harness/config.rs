//! Programmatic configuration builder for integration tests

use adforge_config::{BatchConfig, Config, FalConfig, FreepikConfig};

/// Builder for constructing test configurations
///
/// Poll and pacing intervals default to values fast enough for tests;
/// individual tests override them where timing is the subject.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with a fast inter-item delay
    pub fn new() -> Self {
        Self {
            config: Config {
                providers: adforge_config::ProvidersConfig::default(),
                batch: BatchConfig {
                    item_delay: "10ms".to_string(),
                },
            },
        }
    }

    /// Point the fal provider at a mock backend with fast polling
    pub fn with_fal(self, base_url: &str) -> Self {
        self.with_fal_polling(base_url, "10ms", 60)
    }

    /// Point the fal provider at a mock backend with explicit poll tuning
    pub fn with_fal_polling(mut self, base_url: &str, poll_interval: &str, max_poll_attempts: u32) -> Self {
        self.config.providers.fal = Some(FalConfig {
            api_key: None,
            base_url: Some(base_url.parse().expect("valid URL")),
            model: Some(super::mock_fal::MODEL.to_string()),
            poll_interval: poll_interval.to_string(),
            max_poll_attempts,
        });
        self
    }

    /// Point the freepik provider at a mock backend
    pub fn with_freepik(mut self, base_url: &str) -> Self {
        self.config.providers.freepik = Some(FreepikConfig {
            api_key: None,
            base_url: Some(base_url.parse().expect("valid URL")),
            image_size: None,
        });
        self
    }

    /// Override the inter-item batch delay
    pub fn with_item_delay(mut self, delay: &str) -> Self {
        self.config.batch.item_delay = delay.to_string();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
