use http::StatusCode;
use thiserror::Error;
use wawa_core::HttpError;

/// Errors from the user store and token handling
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database access failed
    #[error("user store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Database directory could not be created
    #[error("failed to create '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user with this email already exists
    #[error("user '{0}' already exists")]
    DuplicateUser(String),

    /// Password hashing or verification failed
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token could not be signed
    #[error("token signing failed: {0}")]
    Token(String),

    /// Blocking task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Store mutex was poisoned by a panic
    #[error("user store lock poisoned")]
    Poisoned,
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateUser(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Store(_) | Self::Io { .. } | Self::Poisoned => "store_error",
            Self::DuplicateUser(_) => "conflict_error",
            Self::Hash(_) | Self::Token(_) | Self::Task(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::DuplicateUser(_) => self.to_string(),
            _ => "Internal server error".to_owned(),
        }
    }
}
