use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Image generation errors
///
/// Single-request callers see the first four variants directly; the batch
/// runner is the one component that recovers locally and only propagates
/// `BatchExhausted` (total failure) or `Cancelled` (caller abort).
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Unconfigured provider or missing credential; raised before any
    /// network call
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-success HTTP response, vendor-reported terminal failure, or a
    /// transport-level failure (no status in that case)
    #[error("provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// Polling exhausted its attempt ceiling without the vendor reaching a
    /// terminal state; distinct from `Provider`: the orchestration gave up,
    /// the vendor did not report failure
    #[error("generation timed out after {attempts} poll attempts ({elapsed:?})")]
    Timeout { attempts: u32, elapsed: Duration },

    /// Response shape does not match the documented vendor contract
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Every item in a batch failed; carries the per-label reasons
    #[error("all {} batch item(s) failed", failures.len())]
    BatchExhausted {
        failures: HashMap<String, String>,
    },

    /// Cooperative cancellation observed at a suspension point
    #[error("generation cancelled")]
    Cancelled,
}
