//! Account login backed by SQLite and HS256 session cookies

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cookie;
mod error;
mod handlers;
mod store;
mod token;

use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use axum::routing::{get, post};
use wawa_config::AuthConfig;

pub use cookie::SessionCookie;
pub use error::AuthError;
pub use handlers::{Credentials, ExtractCredentials};
pub use store::{User, UserStore};
pub use token::{SessionClaims, TokenIssuer, TokenRejection};

/// Shared state of the auth routes
pub struct AuthService {
    store: UserStore,
    tokens: TokenIssuer,
    cookie: SessionCookie,
}

impl AuthService {
    pub const fn new(store: UserStore, tokens: TokenIssuer, cookie: SessionCookie) -> Self {
        Self { store, tokens, cookie }
    }
}

/// Build the auth service from configuration
///
/// Returns `None`, with a warning, when no signing secret is configured.
pub fn build_service(config: Option<&AuthConfig>) -> anyhow::Result<Option<Arc<AuthService>>> {
    let Some((config, secret)) = config.and_then(|c| c.jwt_secret().map(|s| (c, s))) else {
        tracing::warn!("no JWT secret configured, auth routes disabled");
        return Ok(None);
    };

    let store = UserStore::open(&config.database_path)
        .with_context(|| format!("failed to open user store at {}", config.database_path.display()))?;
    let tokens = TokenIssuer::new(secret, config.token_ttl).context("invalid token lifetime")?;
    let cookie = SessionCookie::new(&config.cookie_name, config.token_ttl, config.secure_cookie);

    tracing::info!(
        database = %config.database_path.display(),
        ttl_secs = config.token_ttl.as_secs(),
        "auth service initialized"
    );

    Ok(Some(Arc::new(AuthService::new(store, tokens, cookie))))
}

/// Create the endpoint router for auth
pub fn endpoint_router() -> Router<Arc<AuthService>> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/verify-token", get(handlers::verify_token))
        .route("/logout", post(handlers::logout))
        .route("/role", get(handlers::role))
}
