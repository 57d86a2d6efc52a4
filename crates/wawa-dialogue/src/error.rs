use http::StatusCode;
use thiserror::Error;
use wawa_core::HttpError;

/// Errors that can occur while generating dialogue
#[derive(Debug, Error)]
pub enum DialogueError {
    /// Provider unreachable, returned an error status, or sent an unusable response
    #[error("provider error: {0}")]
    Provider(String),

    /// Provider answered but the reply is not a valid message list
    #[error("malformed reply: {0}")]
    Format(String),

    /// Caller passed input the provider must not be asked about
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl DialogueError {
    /// Whether the provider answered with content that could not be used
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Short label for logs and metrics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Provider(_) => "provider_error",
            Self::Format(_) => "generation_format_error",
            Self::InvalidRequest(_) => "invalid_request_error",
        }
    }
}

impl HttpError for DialogueError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Provider(_) | Self::Format(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_type(&self) -> &str {
        self.kind()
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
