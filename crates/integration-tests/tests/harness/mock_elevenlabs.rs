//! Mock ElevenLabs backend
//!
//! Synthesis returns `fake-mp3:<text>` so tests can trace audio back to
//! the message it was rendered for.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

pub struct MockElevenLabs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockElevenLabsState>,
}

struct MockElevenLabsState {
    synthesis_count: AtomicU32,
    fail_on: Option<String>,
}

impl MockElevenLabs {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Fail synthesis of the given text with a 500
    pub async fn start_failing_on(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some(text.to_owned())).await
    }

    async fn start_inner(fail_on: Option<String>) -> anyhow::Result<Self> {
        let state = Arc::new(MockElevenLabsState {
            synthesis_count: AtomicU32::new(0),
            fail_on,
        });

        let app = Router::new()
            .route("/text-to-speech/{voice}", routing::post(handle_synthesize))
            .route("/voices", routing::get(handle_voices))
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

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn synthesis_count(&self) -> u32 {
        self.state.synthesis_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockElevenLabs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_synthesize(
    State(state): State<Arc<MockElevenLabsState>>,
    Path(_voice): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.synthesis_count.fetch_add(1, Ordering::Relaxed);

    if headers.get("xi-api-key").is_none() {
        return (StatusCode::UNAUTHORIZED, "missing api key").into_response();
    }

    let Ok(request) = serde_json::from_slice::<serde_json::Value>(&body) else {
        return (StatusCode::BAD_REQUEST, "bad body").into_response();
    };
    let text = request["text"].as_str().unwrap_or_default().to_owned();

    if state.fail_on.as_deref() == Some(text.as_str()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "synthesis failed").into_response();
    }

    ([("content-type", "audio/mpeg")], format!("fake-mp3:{text}")).into_response()
}

async fn handle_voices(headers: HeaderMap) -> Response {
    if headers.get("xi-api-key").is_none() {
        return (StatusCode::UNAUTHORIZED, "missing api key").into_response();
    }

    Json(serde_json::json!({
        "voices": [{ "voice_id": "XB0fDUnXU5powFXDhCwa", "name": "Charlotte" }]
    }))
    .into_response()
}
