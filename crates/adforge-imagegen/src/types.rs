use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Instant;

use adforge_core::ProviderId;
use secrecy::SecretString;

/// One image generation request
///
/// All fields are caller-supplied; the credential rides on the request and
/// is never cached. `num_images >= 1` is enforced by the type.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Product being advertised
    pub product_name: String,
    /// Short product description
    pub product_description: String,
    /// Target audience description
    pub audience: String,
    /// Creative angle for this variant
    pub angle: String,
    /// Number of images to generate
    pub num_images: NonZeroU32,
    /// Vendor to route the request to
    pub provider: ProviderId,
    /// Vendor credential; must be non-empty, checked at routing time
    pub api_key: SecretString,
}

impl GenerationRequest {
    /// The textual prompt sent to the vendor
    ///
    /// Deterministic template over the product fields; both adapters share
    /// it so a provider switch does not change the creative brief.
    pub fn prompt(&self) -> String {
        format!(
            "Professional advertising creative for {}: {}. Target audience: {}. \
             Creative angle: {}. High quality product photography, clean composition, no text overlays.",
            self.product_name, self.product_description, self.audience, self.angle,
        )
    }

    /// Copy of this request with the angle replaced
    ///
    /// Used by the batch runner to stamp each item's angle onto the shared
    /// request fields.
    #[must_use]
    pub fn with_angle(&self, angle: &str) -> Self {
        let mut request = self.clone();
        request.angle = angle.to_string();
        request
    }
}

/// Canonical generated image
///
/// Exactly one of `url` / `b64_data` is populated by the adapters; width
/// and height are provider-reported, never computed locally.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Direct reference to the image, fetchable as-is
    pub url: Option<String>,
    /// Base64-encoded image bytes
    pub b64_data: Option<String>,
    pub width: u32,
    pub height: u32,
    /// MIME type as reported by the vendor
    pub content_type: Option<String>,
    /// Vendor that produced the image
    pub provider: ProviderId,
}

impl GeneratedImage {
    /// Image carrying a direct URL reference
    pub fn from_url(
        provider: ProviderId,
        url: String,
        width: u32,
        height: u32,
        content_type: Option<String>,
    ) -> Self {
        Self {
            url: Some(url),
            b64_data: None,
            width,
            height,
            content_type,
            provider,
        }
    }

    /// Image carrying an inline base64 payload
    pub fn from_inline(
        provider: ProviderId,
        b64_data: String,
        width: u32,
        height: u32,
        content_type: Option<String>,
    ) -> Self {
        Self {
            url: None,
            b64_data: Some(b64_data),
            width,
            height,
            content_type,
            provider,
        }
    }
}

/// Handle for a submitted queue job
///
/// Created on successful submission, consumed by the poll loop, never
/// persisted beyond the call.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub request_id: String,
    pub provider: ProviderId,
    pub submitted_at: Instant,
}

impl JobHandle {
    pub fn new(request_id: String, provider: ProviderId) -> Self {
        Self {
            request_id,
            provider,
            submitted_at: Instant::now(),
        }
    }
}

/// Queue job state as seen by the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl PollState {
    /// Map a vendor status string to a poll state
    ///
    /// Unrecognized statuses map to `Queued`: the loop keeps polling until
    /// a terminal state or the attempt ceiling.
    pub fn from_vendor(status: &str) -> Self {
        match status {
            "IN_PROGRESS" => Self::InProgress,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            _ => Self::Queued,
        }
    }
}

/// One labeled variant within a batch
///
/// Label uniqueness within a batch is a caller responsibility.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Caller-assigned identifier, keys the batch result maps
    pub label: String,
    /// Creative angle substituted into the shared request
    pub angle: String,
}

impl BatchItem {
    pub fn new(label: impl Into<String>, angle: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            angle: angle.into(),
        }
    }

    /// Item whose angle text doubles as its label
    pub fn from_angle(angle: impl Into<String>) -> Self {
        let angle = angle.into();
        Self {
            label: angle.clone(),
            angle,
        }
    }
}

/// Outcome of a batch run
///
/// After a batch completes, every input label appears in exactly one of the
/// two maps. No ordering guarantee.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub successes: HashMap<String, GeneratedImage>,
    pub failures: HashMap<String, String>,
}
