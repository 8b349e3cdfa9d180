#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod batch;
mod error;
mod http_client;
pub mod normalize;
mod provider;
mod router;
mod types;

pub use batch::BatchRunner;
pub use error::{ImageGenError, Result};
pub use normalize::to_displayable;
pub use router::ProviderRouter;
pub use types::{BatchItem, BatchResult, GeneratedImage, GenerationRequest, JobHandle, PollState};
