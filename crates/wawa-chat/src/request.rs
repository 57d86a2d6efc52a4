use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Body limit for chat requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Body of `/chat` and `/chat-bot`
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The user's message, if there is one worth answering
    ///
    /// Absent, `null`, empty and whitespace-only messages all count as no input.
    pub fn input(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Extractor for JSON request bodies
///
/// An empty body is read as `{}`. The content type is not checked, so
/// clients posting JSON without a header still work.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|err| {
                if std::error::Error::source(&err)
                    .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
                {
                    reject(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                    )
                } else {
                    reject(StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
                }
            })?;

        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice::<T>(bytes)
            .map(Self)
            .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")))
    }
}

fn reject(status: StatusCode, message: String) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
