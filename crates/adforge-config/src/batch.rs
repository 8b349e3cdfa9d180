use serde::Deserialize;

/// Batch pacing configuration
///
/// Items in a batch run strictly sequentially; the inter-item delay is the
/// rate-limit mechanism, so it applies between consecutive items and is
/// omitted after the last.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Delay inserted between consecutive batch items (e.g. "1s")
    #[serde(default = "default_item_delay")]
    pub item_delay: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            item_delay: default_item_delay(),
        }
    }
}

fn default_item_delay() -> String {
    "1s".to_string()
}
