use adforge_core::{ProviderId, RequestContext};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::ImageGenProvider;
use crate::{
    error::{ImageGenError, Result},
    http_client::http_client,
    types::{GeneratedImage, GenerationRequest},
};

/// Default Freepik API base URL
const DEFAULT_BASE_URL: &str = "https://api.freepik.com";

/// Default size class
const DEFAULT_IMAGE_SIZE: &str = "square_1_1";

/// Steers the vendor away from artifacts that make ad creatives unusable
const NEGATIVE_PROMPT: &str = "blurry, low quality, watermark, text, deformed hands";

/// Freepik text-to-image provider: one HTTP round trip per call
///
/// No retries at this layer; a single failed attempt is a failed call.
pub(crate) struct FreepikProvider {
    client: Client,
    base_url: String,
    image_size: String,
}

impl FreepikProvider {
    /// Build the adapter from its config section
    pub fn from_config(config: &adforge_config::FreepikConfig) -> Self {
        let base_url = config.base_url.as_ref().map_or_else(
            || DEFAULT_BASE_URL.to_string(),
            |url| url.as_str().trim_end_matches('/').to_string(),
        );

        Self {
            client: http_client(),
            base_url,
            image_size: config.image_size.clone().unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
        }
    }

    /// Output dimensions for a size class
    ///
    /// The vendor reports no dimensions in its response; they are a fixed
    /// constant per requested size class.
    fn dimensions(size: &str) -> (u32, u32) {
        match size {
            "widescreen_16_9" => (1280, 720),
            "social_story_9_16" => (720, 1280),
            // square_1_1 and anything unrecognized
            _ => (1024, 1024),
        }
    }
}

/// Wire format for the Freepik text-to-image request
#[derive(Serialize)]
struct FreepikRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    num_images: u32,
    image: FreepikImageParams<'a>,
}

#[derive(Serialize)]
struct FreepikImageParams<'a> {
    size: &'a str,
}

#[derive(Deserialize)]
struct FreepikResponse {
    data: Vec<FreepikImageData>,
}

#[derive(Deserialize)]
struct FreepikImageData {
    base64: String,
    #[serde(default)]
    #[allow(dead_code)]
    has_nsfw: bool,
}

#[async_trait]
impl ImageGenProvider for FreepikProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<Vec<GeneratedImage>> {
        let url = format!("{}/v1/ai/text-to-image", self.base_url);
        let prompt = request.prompt();
        let body = FreepikRequest {
            prompt: &prompt,
            negative_prompt: NEGATIVE_PROMPT,
            num_images: request.num_images.get(),
            image: FreepikImageParams { size: &self.image_size },
        };

        tracing::debug!(num_images = request.num_images.get(), size = %self.image_size, "sending freepik request");

        let send = self
            .client
            .post(&url)
            .header("x-freepik-api-key", request.api_key.expose_secret().to_string())
            .json(&body)
            .send();

        let response = tokio::select! {
            () = context.cancellation.cancelled() => return Err(ImageGenError::Cancelled),
            result = send => result,
        }
        .map_err(|e| {
            tracing::error!(error = %e, "freepik request failed");
            ImageGenError::Provider {
                status: None,
                message: format!("failed to reach freepik API: {e}"),
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(status = %status, "freepik request rejected");

            return Err(ImageGenError::Provider {
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        let parsed: FreepikResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::MalformedResponse(format!("freepik response did not parse: {e}")))?;

        let expected = request.num_images.get() as usize;
        if parsed.data.len() != expected {
            return Err(ImageGenError::MalformedResponse(format!(
                "freepik returned {} image(s), expected {expected}",
                parsed.data.len()
            )));
        }

        let (width, height) = Self::dimensions(&self.image_size);

        Ok(parsed
            .data
            .into_iter()
            .map(|entry| {
                GeneratedImage::from_inline(
                    ProviderId::Freepik,
                    entry.base64,
                    width,
                    height,
                    Some("image/png".to_string()),
                )
            })
            .collect())
    }

    fn id(&self) -> ProviderId {
        ProviderId::Freepik
    }
}
