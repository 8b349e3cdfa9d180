use std::time::Duration;

use adforge_core::{GenerationEvent, ProviderId, RequestContext};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::Serialize;

use super::ImageGenProvider;
use crate::{
    error::{ImageGenError, Result},
    http_client::http_client,
    types::{GeneratedImage, GenerationRequest, JobHandle, PollState},
};

/// Default fal queue API base URL
const DEFAULT_BASE_URL: &str = "https://queue.fal.run";

/// Default model path appended to the base URL
const DEFAULT_MODEL: &str = "fal-ai/flux/dev";

/// Requested size class for the queue API
const IMAGE_SIZE: &str = "square_hd";

const GUIDANCE_SCALE: f64 = 3.5;
const OUTPUT_FORMAT: &str = "png";

/// fal.ai queue provider: submit, poll, fetch
///
/// State machine per call: SUBMITTED → (poll)* → COMPLETED | FAILED |
/// timed out. The poll cadence is a fixed interval, not adaptive backoff:
/// queue-depth-bound vendors have roughly uniform completion latency, so a
/// fixed cadence keeps batch latency predictable and timeout accounting
/// simple.
#[derive(Debug)]
pub(crate) struct FalProvider {
    client: Client,
    base_url: String,
    model: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl FalProvider {
    /// Build the adapter from its config section
    pub fn from_config(config: &adforge_config::FalConfig) -> Result<Self> {
        let poll_interval = duration_str::parse(&config.poll_interval).map_err(|e| {
            ImageGenError::Config(format!("invalid fal poll_interval '{}': {e}", config.poll_interval))
        })?;

        if config.max_poll_attempts == 0 {
            return Err(ImageGenError::Config("fal max_poll_attempts must be greater than 0".to_string()));
        }

        let base_url = config.base_url.as_ref().map_or_else(
            || DEFAULT_BASE_URL.to_string(),
            |url| url.as_str().trim_end_matches('/').to_string(),
        );

        Ok(Self {
            client: http_client(),
            base_url,
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            poll_interval,
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    /// Submit the job, returning a handle for the poll loop
    async fn submit(&self, request: &GenerationRequest, context: &RequestContext) -> Result<JobHandle> {
        let url = format!("{}/{}", self.base_url, self.model);
        let prompt = request.prompt();
        let body = FalSubmitRequest {
            prompt: &prompt,
            image_size: IMAGE_SIZE,
            num_images: request.num_images.get(),
            guidance_scale: GUIDANCE_SCALE,
            enable_safety_checker: true,
            output_format: OUTPUT_FORMAT,
        };

        tracing::debug!(model = %self.model, num_images = request.num_images.get(), "submitting fal job");

        let send = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", request.api_key.expose_secret()))
            .json(&body)
            .send();

        let response = tokio::select! {
            () = context.cancellation.cancelled() => return Err(ImageGenError::Cancelled),
            result = send => result,
        }
        .map_err(|e| {
            tracing::error!(error = %e, "fal submit request failed");
            ImageGenError::Provider {
                status: None,
                message: format!("failed to reach fal queue API: {e}"),
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(status = %status, "fal submit rejected");

            return Err(ImageGenError::Provider {
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        let submit: FalSubmitResponse = response.json().await.map_err(|e| {
            ImageGenError::MalformedResponse(format!("fal submit response did not parse: {e}"))
        })?;

        match submit.request_id {
            Some(request_id) if !request_id.is_empty() => {
                context.emit(&GenerationEvent::JobSubmitted {
                    provider: ProviderId::Fal,
                    request_id: request_id.clone(),
                });

                Ok(JobHandle::new(request_id, ProviderId::Fal))
            }
            _ => Err(ImageGenError::Provider {
                status: None,
                message: "fal submit response carried no request_id".to_string(),
            }),
        }
    }

    /// One authenticated GET against the queue API, cancellation-aware
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        request: &GenerationRequest,
        context: &RequestContext,
        what: &str,
    ) -> Result<T> {
        let send = self
            .client
            .get(url)
            .header("Authorization", format!("Key {}", request.api_key.expose_secret()))
            .send();

        let response = tokio::select! {
            () = context.cancellation.cancelled() => return Err(ImageGenError::Cancelled),
            result = send => result,
        }
        .map_err(|e| {
            tracing::error!(error = %e, "fal {what} request failed");
            ImageGenError::Provider {
                status: None,
                message: format!("failed to fetch fal {what}: {e}"),
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(status = %status, "fal {what} request rejected");

            return Err(ImageGenError::Provider {
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ImageGenError::MalformedResponse(format!("fal {what} response did not parse: {e}")))
    }

    /// Poll until a terminal state or the attempt ceiling
    async fn poll(
        &self,
        handle: &JobHandle,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<Vec<GeneratedImage>> {
        let status_url = format!("{}/{}/requests/{}/status", self.base_url, self.model, handle.request_id);
        let result_url = format!("{}/{}/requests/{}", self.base_url, self.model, handle.request_id);

        for attempt in 1..=self.max_poll_attempts {
            tokio::select! {
                () = context.cancellation.cancelled() => return Err(ImageGenError::Cancelled),
                () = tokio::time::sleep(self.poll_interval) => {}
            }

            let status: FalStatusResponse = self.get_json(&status_url, request, context, "status").await?;

            match PollState::from_vendor(&status.status) {
                PollState::Completed => {
                    tracing::debug!(request_id = %handle.request_id, attempt, "fal job completed");

                    let result: FalResultResponse = self.get_json(&result_url, request, context, "result").await?;

                    return Ok(result
                        .images
                        .into_iter()
                        .map(|image| {
                            GeneratedImage::from_url(
                                ProviderId::Fal,
                                image.url,
                                image.width,
                                image.height,
                                image.content_type,
                            )
                        })
                        .collect());
                }
                PollState::Failed => {
                    let reason = status.error.unwrap_or_else(|| "vendor reported failure without a reason".to_string());

                    tracing::warn!(request_id = %handle.request_id, reason = %reason, "fal job failed");

                    return Err(ImageGenError::Provider {
                        status: None,
                        message: reason,
                    });
                }
                PollState::Queued | PollState::InProgress => {
                    context.emit(&GenerationEvent::JobPolled {
                        provider: ProviderId::Fal,
                        request_id: handle.request_id.clone(),
                        attempt,
                        state: status.status,
                    });
                }
            }
        }

        Err(ImageGenError::Timeout {
            attempts: self.max_poll_attempts,
            elapsed: self.poll_interval * self.max_poll_attempts,
        })
    }
}

/// Wire format for the fal queue submit request
#[derive(Serialize)]
struct FalSubmitRequest<'a> {
    prompt: &'a str,
    image_size: &'a str,
    num_images: u32,
    guidance_scale: f64,
    enable_safety_checker: bool,
    output_format: &'a str,
}

#[derive(Deserialize)]
struct FalSubmitResponse {
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Deserialize)]
struct FalStatusResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct FalResultResponse {
    images: Vec<FalResultImage>,
}

#[derive(Deserialize)]
struct FalResultImage {
    url: String,
    #[serde(default)]
    content_type: Option<String>,
    width: u32,
    height: u32,
}

#[async_trait]
impl ImageGenProvider for FalProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<Vec<GeneratedImage>> {
        let handle = self.submit(request, context).await?;
        self.poll(&handle, request, context).await
    }

    fn id(&self) -> ProviderId {
        ProviderId::Fal
    }
}
