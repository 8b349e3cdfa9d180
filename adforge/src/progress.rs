use adforge_core::{GenerationEvent, ProgressObserver};

/// Observer that forwards generation progress to the log
///
/// The core emits events instead of printing; this is the CLI's sink.
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_event(&self, event: &GenerationEvent) {
        match event {
            GenerationEvent::BatchStarted { total } => {
                tracing::info!(total, "batch started");
            }
            GenerationEvent::ItemStarted { label, provider } => {
                tracing::info!(label = %label, provider = %provider, "generating variant");
            }
            GenerationEvent::ItemCompleted { label } => {
                tracing::info!(label = %label, "variant ready");
            }
            GenerationEvent::ItemFailed { label, error } => {
                tracing::warn!(label = %label, error = %error, "variant failed");
            }
            GenerationEvent::JobSubmitted { provider, request_id } => {
                tracing::info!(provider = %provider, request_id = %request_id, "job queued");
            }
            GenerationEvent::JobPolled {
                request_id,
                attempt,
                state,
                ..
            } => {
                tracing::debug!(request_id = %request_id, attempt, state = %state, "still waiting");
            }
            GenerationEvent::BatchCompleted { succeeded, failed } => {
                tracing::info!(succeeded, failed, "batch finished");
            }
        }
    }
}
