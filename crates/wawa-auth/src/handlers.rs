use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::header::SET_COOKIE;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::json;
use wawa_core::HttpError;

use crate::AuthService;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Email and password from a request body
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    fn pair(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

/// Lenient credentials extractor
///
/// Unreadable or non-JSON bodies yield empty credentials, which each
/// handler then rejects in its own format.
pub struct ExtractCredentials(pub Credentials);

impl<S> axum::extract::FromRequest<S> for ExtractCredentials
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let credentials = match axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(e) => {
                tracing::debug!(error = %e, "credentials body unreadable");
                Credentials::default()
            }
        };

        Ok(Self(credentials))
    }
}

/// Handle `POST /login`
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    ExtractCredentials(credentials): ExtractCredentials,
) -> Response {
    let Some((email, password)) = credentials.pair() else {
        return login_rejected();
    };

    let user = match auth.store.authenticate(email, password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(email, "login rejected");
            return login_rejected();
        }
        Err(e) => return internal_error(&e, Shape::Status),
    };

    let cookie = match auth.tokens.issue(&user.email, &user.role) {
        Ok(token) => auth.cookie.issue(&token),
        Err(e) => return internal_error(&e, Shape::Status),
    };

    tracing::info!(email = %user.email, role = %user.role, "user logged in");

    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie {
        headers.insert(SET_COOKIE, cookie);
    }

    (
        headers,
        Json(json!({
            "success": true,
            "message": "Logged in successfully",
            "role": user.role,
        })),
    )
        .into_response()
}

/// Handle `GET /verify-token`
pub async fn verify_token(State(auth): State<Arc<AuthService>>, headers: HeaderMap) -> Response {
    let unauthenticated = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Unauthenticated" })),
        )
            .into_response()
    };

    let Some(token) = auth.cookie.read(&headers) else {
        return unauthenticated();
    };

    match auth.tokens.verify(token) {
        Ok(claims) => Json(json!({ "success": true, "role": claims.role })).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "session token rejected");
            unauthenticated()
        }
    }
}

/// Handle `POST /logout`
pub async fn logout(State(auth): State<Arc<AuthService>>) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = auth.cookie.clear() {
        headers.insert(SET_COOKIE, cookie);
    }

    (
        headers,
        Json(json!({ "success": true, "message": "Logged out successfully" })),
    )
        .into_response()
}

/// Handle `GET /role`
pub async fn role(
    State(auth): State<Arc<AuthService>>,
    ExtractCredentials(credentials): ExtractCredentials,
) -> Response {
    let Some((email, password)) = credentials.pair() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email and password are required" })),
        )
            .into_response();
    };

    match auth.store.authenticate(email, password).await {
        Ok(Some(user)) => Json(json!({ "role": user.role })).into_response(),
        Ok(None) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid credentials" }))).into_response(),
        Err(e) => internal_error(&e, Shape::Error),
    }
}

fn login_rejected() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Invalid credentials" })),
    )
        .into_response()
}

/// Body layout of a route's failure responses
#[derive(Clone, Copy)]
enum Shape {
    /// `{ "success": false, "message": .. }`
    Status,
    /// `{ "error": .. }`
    Error,
}

fn internal_error(error: &crate::AuthError, shape: Shape) -> Response {
    tracing::error!(error = %error, error_type = error.error_type(), "auth request failed");

    let body = match shape {
        Shape::Status => json!({ "success": false, "message": error.client_message() }),
        Shape::Error => json!({ "error": error.client_message() }),
    };

    (error.status_code(), Json(body)).into_response()
}
