use crate::provider::ProviderId;

/// Progress events emitted while a generation call or batch runs
///
/// The core never prints progress itself; callers that want a console
/// spinner, a websocket push, or nothing at all install an observer.
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// A batch run began with this many items
    BatchStarted { total: usize },
    /// One labeled item is about to be generated
    ItemStarted { label: String, provider: ProviderId },
    /// The item produced at least one image
    ItemCompleted { label: String },
    /// The item failed; the batch continues
    ItemFailed { label: String, error: String },
    /// A queue provider accepted the job
    JobSubmitted { provider: ProviderId, request_id: String },
    /// One poll attempt finished without reaching a terminal state
    JobPolled {
        provider: ProviderId,
        request_id: String,
        attempt: u32,
        state: String,
    },
    /// The batch finished; counts cover every input item
    BatchCompleted { succeeded: usize, failed: usize },
}

/// Sink for progress events
///
/// Implementations must be cheap and non-blocking; events are emitted
/// from inside the generation path.
pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &GenerationEvent);
}

/// Observer that discards every event
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &GenerationEvent) {}
}
