//! Mock Freepik backend for integration tests
//!
//! Implements the single text-to-image endpoint with failure injection and
//! a forceable result count for contract-violation tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Mock Freepik backend returning inline base64 payloads
pub struct MockFreepik {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockFreepikState>,
}

struct MockFreepikState {
    request_count: AtomicU32,
    /// HTTP status to fail every request with (None = succeed)
    fail_status: Option<u16>,
    /// Fail requests while the counter is below this threshold, keyed by
    /// 1-based request index (None = apply fail_status to all requests)
    fail_only_request: Option<u32>,
    /// Return this many images regardless of num_images
    force_count: Option<usize>,
}

impl MockFreepik {
    /// Start a mock that succeeds every request
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None, None, None).await
    }

    /// Start a mock that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Some(status), None, None).await
    }

    /// Start a mock that fails only the nth request (1-based)
    pub async fn start_failing_request(n: u32, status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Some(status), Some(n), None).await
    }

    /// Start a mock that always returns `count` images
    pub async fn start_with_count(count: usize) -> anyhow::Result<Self> {
        Self::start_inner(None, None, Some(count)).await
    }

    async fn start_inner(
        fail_status: Option<u16>,
        fail_only_request: Option<u32>,
        force_count: Option<usize>,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockFreepikState {
            request_count: AtomicU32::new(0),
            fail_status,
            fail_only_request,
            force_count,
        });

        let app = Router::new()
            .route("/v1/ai/text-to-image", routing::post(handle_generate))
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

    /// Base URL for configuring the mock as the freepik provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockFreepik {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    #[allow(dead_code)]
    prompt: String,
    num_images: usize,
}

async fn handle_generate(
    State(state): State<Arc<MockFreepikState>>,
    Json(request): Json<GenerateRequest>,
) -> axum::response::Response {
    let index = state.request_count.fetch_add(1, Ordering::Relaxed) + 1;

    if let Some(status) = state.fail_status {
        let applies = state.fail_only_request.is_none_or(|n| n == index);
        if applies {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (code, "injected vendor failure").into_response();
        }
    }

    let count = state.force_count.unwrap_or(request.num_images);
    let data: Vec<serde_json::Value> = (0..count)
        .map(|_| json!({ "base64": "aGVsbG8=", "has_nsfw": false }))
        .collect();

    Json(json!({ "data": data })).into_response()
}
