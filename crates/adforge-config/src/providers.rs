use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Image generation provider sections
///
/// Each supported vendor has a fixed section; a missing section means the
/// provider is not configured and requests routed to it fail before any
/// network call.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// fal.ai queue API (submit, poll, fetch)
    #[serde(default)]
    pub fal: Option<FalConfig>,
    /// Freepik text-to-image API (single round trip)
    #[serde(default)]
    pub freepik: Option<FreepikConfig>,
}

/// Configuration for the fal.ai queue provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FalConfig {
    /// Default API key, used by callers that do not supply one per request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model path appended to the base URL (e.g. "fal-ai/flux/dev")
    #[serde(default)]
    pub model: Option<String>,
    /// Interval between job status polls (e.g. "2s")
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
    /// Hard ceiling on poll attempts before the job is considered timed out
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

/// Configuration for the Freepik sync provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreepikConfig {
    /// Default API key, used by callers that do not supply one per request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Requested size class (e.g. "square_1_1"); output dimensions are a
    /// fixed constant per class
    #[serde(default)]
    pub image_size: Option<String>,
}

fn default_poll_interval() -> String {
    "2s".to_string()
}

fn default_max_poll_attempts() -> u32 {
    60
}
