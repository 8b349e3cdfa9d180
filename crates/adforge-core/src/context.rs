use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::observer::{GenerationEvent, NoopObserver, ProgressObserver};

/// Runtime context for generation calls
///
/// Carries the cooperative cancellation signal and the progress sink.
/// Cheap to clone; both fields are shared handles.
#[derive(Clone)]
pub struct RequestContext {
    /// Checked at every suspension point (HTTP calls, poll waits,
    /// inter-item delays); a cancelled token aborts the call
    pub cancellation: CancellationToken,
    /// Receives progress events for the call
    pub observer: Arc<dyn ProgressObserver>,
}

impl RequestContext {
    /// Context with a never-cancelled token and no observer
    pub fn new() -> Self {
        Self {
            cancellation: CancellationToken::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Replace the progress observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Emit a progress event to the installed observer
    pub fn emit(&self, event: &GenerationEvent) {
        self.observer.on_event(event);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
