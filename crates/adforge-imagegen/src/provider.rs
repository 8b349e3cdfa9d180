pub(crate) mod fal;
pub(crate) mod freepik;

use adforge_core::{ProviderId, RequestContext};
use async_trait::async_trait;

use crate::{
    error::Result,
    types::{GeneratedImage, GenerationRequest},
};

/// Capability implemented by every image generation vendor adapter
///
/// Adapters are stateless across calls and safe to share; rate limiting is
/// the batch runner's concern, not theirs.
#[async_trait]
pub(crate) trait ImageGenProvider: Send + Sync {
    /// Generate images for the given request
    async fn generate(
        &self,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<Vec<GeneratedImage>>;

    /// Get the provider identifier
    fn id(&self) -> ProviderId;
}
