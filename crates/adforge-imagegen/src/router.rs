use std::collections::HashMap;
use std::sync::Arc;

use adforge_core::{ProviderId, RequestContext};
use secrecy::ExposeSecret;

use crate::{
    error::{ImageGenError, Result},
    provider::{ImageGenProvider, fal::FalProvider, freepik::FreepikProvider},
    types::{GeneratedImage, GenerationRequest},
};

/// Routes generation requests to the configured vendor adapter
///
/// Stateless across calls; safe to share between concurrent batches. An
/// unconfigured provider id is rejected before any network call.
pub struct ProviderRouter {
    providers: HashMap<ProviderId, Arc<dyn ImageGenProvider>>,
}

impl ProviderRouter {
    /// Build the router from configuration, one adapter per present section
    pub fn from_config(config: &adforge_config::Config) -> Result<Self> {
        let mut providers: HashMap<ProviderId, Arc<dyn ImageGenProvider>> = HashMap::new();

        if let Some(ref fal) = config.providers.fal {
            tracing::debug!("initializing fal provider");
            providers.insert(ProviderId::Fal, Arc::new(FalProvider::from_config(fal)?));
        }

        if let Some(ref freepik) = config.providers.freepik {
            tracing::debug!("initializing freepik provider");
            providers.insert(ProviderId::Freepik, Arc::new(FreepikProvider::from_config(freepik)));
        }

        Ok(Self { providers })
    }

    /// Generate images using the adapter declared by the request
    ///
    /// # Errors
    ///
    /// `Config` for a blank credential or an unconfigured provider;
    /// adapter errors pass through untouched.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<Vec<GeneratedImage>> {
        if request.api_key.expose_secret().is_empty() {
            return Err(ImageGenError::Config(format!(
                "api key for provider '{}' must not be empty",
                request.provider
            )));
        }

        let provider = self.providers.get(&request.provider).ok_or_else(|| {
            ImageGenError::Config(format!("provider '{}' is not configured", request.provider))
        })?;

        tracing::debug!(provider = %provider.id(), num_images = request.num_images.get(), "dispatching generation request");

        provider.generate(request, context).await
    }
}
