//! Mock Gemini `generateContent` backend
//!
//! Answers every request with a fixed model reply, an echo of the user
//! message, or an HTTP error.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    reply: Reply,
    request_count: AtomicU32,
    last_request: Mutex<Option<RecordedRequest>>,
}

enum Reply {
    Text(String),
    Echo,
    Status(StatusCode),
}

/// What the backend saw on the last call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub action: String,
    pub key: Option<String>,
    pub body: serde_json::Value,
}

impl MockGemini {
    /// Reply with `text` as the model output
    pub async fn start_with_reply(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Text(text.to_owned())).await
    }

    /// Reply with descriptors serialized as a JSON array
    pub async fn start_with_messages(messages: &serde_json::Value) -> anyhow::Result<Self> {
        Self::start_with_reply(&messages.to_string()).await
    }

    /// Reply with a single message repeating the user's text
    pub async fn start_echo() -> anyhow::Result<Self> {
        Self::start_inner(Reply::Echo).await
    }

    /// Fail every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Status(StatusCode::from_u16(status)?)).await
    }

    async fn start_inner(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            reply,
            request_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/models/{action}", routing::post(handle_generate))
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

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(serde::Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

async fn handle_generate(
    State(state): State<Arc<MockGeminiState>>,
    Path(action): Path<String>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let user_text = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default().to_owned();
    *state.last_request.lock().unwrap() = Some(RecordedRequest {
        action,
        key: query.key,
        body,
    });

    match &state.reply {
        Reply::Text(text) => candidate(text),
        Reply::Echo => candidate(&serde_json::json!([{ "text": user_text }]).to_string()),
        Reply::Status(status) => (
            *status,
            Json(serde_json::json!({ "error": { "code": status.as_u16(), "message": "mock failure" } })),
        )
            .into_response(),
    }
}

fn candidate(text: &str) -> Response {
    Json(serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}
