use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of supported image generation vendors
///
/// Adding a vendor means adding a variant here and an adapter
/// implementing the generation capability for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// fal.ai queue API (submit, poll, fetch)
    Fal,
    /// Freepik text-to-image API (single round trip)
    Freepik,
}

impl ProviderId {
    /// Stable identifier used in config, logs, and the CLI
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fal => "fal",
            Self::Freepik => "freepik",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fal" => Ok(Self::Fal),
            "freepik" => Ok(Self::Freepik),
            other => Err(UnknownProvider(other.to_owned())),
        }
    }
}

/// A provider identifier outside the supported set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);
