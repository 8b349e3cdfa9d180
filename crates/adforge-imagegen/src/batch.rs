use std::sync::Arc;
use std::time::Duration;

use adforge_core::{GenerationEvent, RequestContext};

use crate::{
    error::{ImageGenError, Result},
    router::ProviderRouter,
    types::{BatchItem, BatchResult, GenerationRequest},
};

/// Drives generation for an ordered collection of labeled variants
///
/// Items run strictly sequentially with a fixed delay between consecutive
/// items; the serialization is the rate-limit mechanism, not an accident.
/// A future parallel version must reintroduce an explicit rate limiter
/// sized to the vendor's documented limits.
pub struct BatchRunner {
    router: Arc<ProviderRouter>,
    item_delay: Duration,
}

impl BatchRunner {
    pub fn new(router: Arc<ProviderRouter>, item_delay: Duration) -> Self {
        Self { router, item_delay }
    }

    /// Build the runner from the batch config section
    pub fn from_config(router: Arc<ProviderRouter>, config: &adforge_config::BatchConfig) -> Result<Self> {
        let item_delay = duration_str::parse(&config.item_delay).map_err(|e| {
            ImageGenError::Config(format!("invalid batch item_delay '{}': {e}", config.item_delay))
        })?;

        Ok(Self::new(router, item_delay))
    }

    /// Generate one image per labeled item, tolerating per-item failures
    ///
    /// Per item the first returned image is recorded under its label; a
    /// failed item lands in the failure map and the loop continues. The
    /// two exceptions: cancellation aborts the batch, and a batch with no
    /// successes at all is reported as `BatchExhausted`.
    ///
    /// # Errors
    ///
    /// `BatchExhausted` when every item failed; `Cancelled` when the
    /// caller's token fires at any suspension point.
    pub async fn generate_batch(
        &self,
        items: &[BatchItem],
        shared: &GenerationRequest,
        context: &RequestContext,
    ) -> Result<BatchResult> {
        context.emit(&GenerationEvent::BatchStarted { total: items.len() });

        let mut result = BatchResult::default();

        for (index, item) in items.iter().enumerate() {
            // Inter-item pacing, omitted before the first item
            if index > 0 {
                tokio::select! {
                    () = context.cancellation.cancelled() => return Err(ImageGenError::Cancelled),
                    () = tokio::time::sleep(self.item_delay) => {}
                }
            }

            context.emit(&GenerationEvent::ItemStarted {
                label: item.label.clone(),
                provider: shared.provider,
            });

            let request = shared.with_angle(&item.angle);

            match self.router.generate(&request, context).await {
                Ok(images) => match images.into_iter().next() {
                    Some(image) => {
                        tracing::debug!(label = %item.label, "batch item succeeded");

                        context.emit(&GenerationEvent::ItemCompleted {
                            label: item.label.clone(),
                        });

                        result.successes.insert(item.label.clone(), image);
                    }
                    None => {
                        let reason = "provider returned no images".to_string();

                        tracing::warn!(label = %item.label, "batch item produced an empty result");

                        context.emit(&GenerationEvent::ItemFailed {
                            label: item.label.clone(),
                            error: reason.clone(),
                        });

                        result.failures.insert(item.label.clone(), reason);
                    }
                },
                Err(ImageGenError::Cancelled) => return Err(ImageGenError::Cancelled),
                Err(error) => {
                    tracing::warn!(label = %item.label, error = %error, "batch item failed");

                    context.emit(&GenerationEvent::ItemFailed {
                        label: item.label.clone(),
                        error: error.to_string(),
                    });

                    result.failures.insert(item.label.clone(), error.to_string());
                }
            }
        }

        context.emit(&GenerationEvent::BatchCompleted {
            succeeded: result.successes.len(),
            failed: result.failures.len(),
        });

        if result.successes.is_empty() {
            return Err(ImageGenError::BatchExhausted {
                failures: result.failures,
            });
        }

        Ok(result)
    }
}
