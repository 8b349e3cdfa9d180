#![allow(clippy::must_use_candidate)]

mod context;
mod observer;
mod provider;

pub use context::RequestContext;
pub use observer::{GenerationEvent, NoopObserver, ProgressObserver};
pub use provider::{ProviderId, UnknownProvider};
