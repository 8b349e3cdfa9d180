//! Shared test harness: mock vendor servers and config helpers

#![allow(dead_code)]

pub mod config;
pub mod mock_fal;
pub mod mock_freepik;

use std::num::NonZeroU32;
use std::sync::Mutex;

use adforge_core::{GenerationEvent, ProgressObserver, ProviderId};
use adforge_imagegen::GenerationRequest;
use secrecy::SecretString;

/// A well-formed request for the given provider
pub fn request(provider: ProviderId, num_images: u32) -> GenerationRequest {
    GenerationRequest {
        product_name: "SolarKettle".to_string(),
        product_description: "a kettle that boils water with sunlight".to_string(),
        audience: "off-grid campers".to_string(),
        angle: "boil anywhere".to_string(),
        num_images: NonZeroU32::new(num_images).expect("num_images must be >= 1"),
        provider,
        api_key: SecretString::from("test-key"),
    }
}

/// Observer that records the kind of every event it sees
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<String>>,
}

impl CollectingObserver {
    pub fn kinds(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressObserver for CollectingObserver {
    fn on_event(&self, event: &GenerationEvent) {
        let kind = match event {
            GenerationEvent::BatchStarted { .. } => "batch_started",
            GenerationEvent::ItemStarted { .. } => "item_started",
            GenerationEvent::ItemCompleted { .. } => "item_completed",
            GenerationEvent::ItemFailed { .. } => "item_failed",
            GenerationEvent::JobSubmitted { .. } => "job_submitted",
            GenerationEvent::JobPolled { .. } => "job_polled",
            GenerationEvent::BatchCompleted { .. } => "batch_completed",
        };
        self.events.lock().unwrap().push(kind.to_string());
    }
}
