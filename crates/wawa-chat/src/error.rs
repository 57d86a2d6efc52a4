use std::path::PathBuf;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use lipsync::{LipSyncError, ToolError};
use thiserror::Error;
use tts::TtsError;
use wawa_core::{HttpError, LipSyncParseError};
use wawa_dialogue::DialogueError;

/// Failure rendering a reply; the whole reply is abandoned
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Scratch directory could not be created
    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("message {index}: speech synthesis failed: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: TtsError,
    },

    #[error("message {index}: audio transcoding failed: {source}")]
    Tool {
        index: usize,
        #[source]
        source: ToolError,
    },

    #[error("message {index}: lip-sync extraction failed: {source}")]
    LipSync {
        index: usize,
        #[source]
        source: LipSyncError,
    },

    /// Reading or writing an artifact failed
    #[error("message {index}: {}: {source}", path.display())]
    Io {
        index: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Ordinal of the message whose chain failed
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Scratch(_) => None,
            Self::Synthesis { index, .. }
            | Self::Tool { index, .. }
            | Self::LipSync { index, .. }
            | Self::Io { index, .. } => Some(*index),
        }
    }

    /// Short label for logs and metrics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Synthesis { .. } => "provider_error",
            Self::Tool { .. }
            | Self::LipSync {
                source: LipSyncError::Tool(_),
                ..
            } => "external_tool_error",
            Self::LipSync { .. } => "lipsync_output_error",
            Self::Scratch(_) | Self::Io { .. } => "io_error",
        }
    }
}

/// Failure loading a pre-recorded response
#[derive(Debug, Error)]
pub enum CannedError {
    #[error("failed to read canned asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid canned cue file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: LipSyncParseError,
    },
}

/// Errors surfaced by the chat endpoints
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Canned(#[from] CannedError),

    /// Voice listing failed upstream
    #[error(transparent)]
    Voices(TtsError),

    /// No speech provider is configured
    #[error("speech synthesis is not configured")]
    SpeechUnavailable,
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Voices(e) => e.status_code(),
            Self::SpeechUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Dialogue(_) | Self::Pipeline(_) | Self::Canned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Dialogue(e) => e.kind(),
            Self::Pipeline(e) => e.kind(),
            Self::Canned(_) => "canned_asset_error",
            Self::Voices(e) => e.error_type(),
            Self::SpeechUnavailable => "credentials_missing",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Voices(e) => e.client_message(),
            Self::SpeechUnavailable => self.to_string(),
            Self::Dialogue(_) | Self::Pipeline(_) | Self::Canned(_) => "an internal error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = self.error_type(), error = %self, "chat request failed");
        } else {
            tracing::warn!(kind = self.error_type(), error = %self, "chat request rejected");
        }

        let body = serde_json::json!({ "error": self.client_message() });

        (status, Json(body)).into_response()
    }
}
