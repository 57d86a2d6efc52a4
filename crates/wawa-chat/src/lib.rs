//! Chat endpoints for the avatar client
//!
//! `/chat` turns a user message into rendered messages (text, audio and
//! lip-sync cues), `/chat-bot` returns the generated text only and
//! `/voices` lists the speech provider's voices.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod canned;
mod error;
mod pipeline;
mod request;
mod scratch;
mod server;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use wawa_core::{RenderedMessage, TextMessage};

pub use canned::CannedResponses;
pub use error::{CannedError, ChatError, PipelineError};
pub use pipeline::MessagePipeline;
pub use request::{ChatRequest, ExtractPayload};
pub use scratch::{ScratchDir, ScratchSpace};
pub use server::{ChatServer, ChatServerBuilder};

/// Reply envelope shared by `/chat` and `/chat-bot`
#[derive(Debug, Serialize)]
pub struct ChatResponse<T> {
    pub messages: Vec<T>,
}

/// Build the chat server from configuration
pub fn build_server(config: &wawa_config::Config) -> Arc<ChatServer> {
    Arc::new(ChatServerBuilder::new(config).build())
}

/// Create the endpoint router for chat
pub fn endpoint_router() -> Router<Arc<ChatServer>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat-bot", post(chat_bot))
        .route("/voices", get(voices))
}

/// Handle `POST /chat`
async fn chat(
    State(server): State<Arc<ChatServer>>,
    ExtractPayload(request): ExtractPayload<ChatRequest>,
) -> Result<Json<ChatResponse<RenderedMessage>>, ChatError> {
    tracing::debug!(has_input = request.input().is_some(), "chat handler called");

    let messages = server.chat(request.input()).await?;

    Ok(Json(ChatResponse { messages }))
}

/// Handle `POST /chat-bot`
async fn chat_bot(
    State(server): State<Arc<ChatServer>>,
    ExtractPayload(request): ExtractPayload<ChatRequest>,
) -> Result<Json<ChatResponse<TextMessage>>, ChatError> {
    tracing::debug!(has_input = request.input().is_some(), "chat-bot handler called");

    let messages = server.chat_text(request.input()).await?;

    Ok(Json(ChatResponse { messages }))
}

/// Handle `GET /voices`
async fn voices(State(server): State<Arc<ChatServer>>) -> Result<Json<serde_json::Value>, ChatError> {
    server.voices().await.map(Json)
}
