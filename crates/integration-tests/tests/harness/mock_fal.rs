//! Mock fal queue backend for integration tests
//!
//! Implements the submit / status / result endpoints with a scriptable
//! number of non-terminal polls before completion, plus failure injection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Model path the mock serves; configs must point at the same path
pub const MODEL: &str = "fal-ai/flux/dev";

/// Mock fal queue backend with predictable job progress
pub struct MockFal {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockFalState>,
}

struct MockFalState {
    submit_count: AtomicU32,
    status_count: AtomicU32,
    result_count: AtomicU32,
    /// Non-terminal statuses to report before COMPLETED
    pending_polls: AtomicU32,
    /// Vendor-reported failure reason instead of completing
    fail_reason: Option<String>,
    /// Leave request_id out of the submit response
    omit_request_id: bool,
    width: u32,
    height: u32,
}

impl MockFal {
    /// Start a mock whose job completes after `pending_polls` non-terminal
    /// status reports
    pub async fn start(pending_polls: u32) -> anyhow::Result<Self> {
        Self::start_inner(pending_polls, None, false, 1024, 768).await
    }

    /// Start a mock whose job never leaves IN_PROGRESS
    pub async fn start_never_completing() -> anyhow::Result<Self> {
        Self::start_inner(u32::MAX, None, false, 1024, 768).await
    }

    /// Start a mock whose job fails with the given vendor reason
    pub async fn start_failing(reason: &str) -> anyhow::Result<Self> {
        Self::start_inner(0, Some(reason.to_owned()), false, 1024, 768).await
    }

    /// Start a mock whose submit response carries no request_id
    pub async fn start_without_request_id() -> anyhow::Result<Self> {
        Self::start_inner(0, None, true, 1024, 768).await
    }

    /// Start a mock reporting the given result dimensions
    pub async fn start_with_dimensions(pending_polls: u32, width: u32, height: u32) -> anyhow::Result<Self> {
        Self::start_inner(pending_polls, None, false, width, height).await
    }

    async fn start_inner(
        pending_polls: u32,
        fail_reason: Option<String>,
        omit_request_id: bool,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockFalState {
            submit_count: AtomicU32::new(0),
            status_count: AtomicU32::new(0),
            result_count: AtomicU32::new(0),
            pending_polls: AtomicU32::new(pending_polls),
            fail_reason,
            omit_request_id,
            width,
            height,
        });

        let app = Router::new()
            .route(&format!("/{MODEL}"), routing::post(handle_submit))
            .route(&format!("/{MODEL}/requests/{{id}}/status"), routing::get(handle_status))
            .route(&format!("/{MODEL}/requests/{{id}}"), routing::get(handle_result))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the fal provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of submit requests received
    pub fn submit_count(&self) -> u32 {
        self.state.submit_count.load(Ordering::Relaxed)
    }

    /// Number of status polls received
    pub fn status_count(&self) -> u32 {
        self.state.status_count.load(Ordering::Relaxed)
    }

    /// Number of result fetches received
    pub fn result_count(&self) -> u32 {
        self.state.result_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockFal {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_submit(State(state): State<Arc<MockFalState>>) -> Json<serde_json::Value> {
    state.submit_count.fetch_add(1, Ordering::Relaxed);

    if state.omit_request_id {
        Json(json!({}))
    } else {
        Json(json!({ "request_id": "job-1" }))
    }
}

async fn handle_status(State(state): State<Arc<MockFalState>>) -> Json<serde_json::Value> {
    state.status_count.fetch_add(1, Ordering::Relaxed);

    if let Some(ref reason) = state.fail_reason {
        return Json(json!({ "status": "FAILED", "error": reason }));
    }

    let remaining = state.pending_polls.load(Ordering::Relaxed);
    if remaining > 0 {
        if remaining != u32::MAX {
            state.pending_polls.store(remaining - 1, Ordering::Relaxed);
        }
        return Json(json!({ "status": "IN_PROGRESS" }));
    }

    Json(json!({ "status": "COMPLETED" }))
}

async fn handle_result(State(state): State<Arc<MockFalState>>) -> Json<serde_json::Value> {
    state.result_count.fetch_add(1, Ordering::Relaxed);

    Json(json!({
        "images": [{
            "url": "https://cdn.mock-fal.test/job-1.png",
            "content_type": "image/png",
            "width": state.width,
            "height": state.height,
        }]
    }))
}
