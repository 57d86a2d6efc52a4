//! Google Generative Language API provider implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use wawa_config::DialogueConfig;
use wawa_core::MessageDescriptor;

use super::DialogueProvider;
use crate::error::DialogueError;
use crate::http_client::http_client;
use crate::protocol::{GoogleContent, GoogleGenerationConfig, GoogleRequest, GoogleResponse};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Generative Language API provider
pub struct GoogleProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    persona: String,
    generation: GoogleGenerationConfig,
    max_messages: usize,
    timeout: Duration,
}

impl GoogleProvider {
    /// Create from dialogue configuration
    pub fn new(config: &DialogueConfig, api_key: SecretString) -> Self {
        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        let persona = config
            .persona
            .clone()
            .unwrap_or_else(|| crate::persona::default_persona(config.max_messages));

        Self {
            client: http_client(),
            base_url,
            api_key,
            model: config.model.clone(),
            persona,
            generation: (&config.generation).into(),
            max_messages: config.max_messages,
            timeout: config.timeout,
        }
    }

    /// Build the `generateContent` endpoint URL for the configured model
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl DialogueProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn generate(&self, message: &str) -> Result<Vec<MessageDescriptor>, DialogueError> {
        if message.trim().is_empty() {
            return Err(DialogueError::InvalidRequest("message must not be empty".to_owned()));
        }

        let wire_request = GoogleRequest {
            contents: vec![GoogleContent::text(Some("user"), message)],
            system_instruction: Some(GoogleContent::text(None, self.persona.as_str())),
            generation_config: Some(self.generation.clone()),
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.expose_secret())])
            .timeout(self.timeout)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                tracing::error!(model = %self.model, error = %e, "upstream request failed");
                DialogueError::Provider(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = %status, "upstream returned error");
            return Err(DialogueError::Provider(format!("provider returned {status}: {body}")));
        }

        let wire_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| DialogueError::Provider(format!("failed to parse response: {}", e.without_url())))?;

        let Some(text) = wire_response.text() else {
            let reason = wire_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("no candidates");
            return Err(DialogueError::Provider(format!("response contained no text ({reason})")));
        };

        let descriptors = crate::parse::parse_descriptors(&text, self.max_messages).inspect_err(|e| {
            tracing::warn!(model = %self.model, error = %e, "reply could not be parsed");
        })?;

        tracing::debug!(model = %self.model, messages = descriptors.len(), "dialogue generated");

        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        routing::post,
    };
    use serde_json::{Value, json};
    use wawa_core::{Animation, FacialExpression};

    use super::*;

    async fn spawn(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        address
    }

    fn provider(address: SocketAddr) -> GoogleProvider {
        let config = DialogueConfig {
            base_url: Some(format!("http://{address}/v1beta/").parse().unwrap()),
            ..DialogueConfig::default()
        };
        GoogleProvider::new(&config, SecretString::from("gemini-key"))
    }

    fn reply(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn sends_persona_and_parses_reply() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(
                |Path(model): Path<String>, Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                    assert_eq!(model, "gemini-1.5-flash:generateContent");
                    assert_eq!(query["key"], "gemini-key");
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
                    let persona = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
                    assert!(persona.starts_with("You are a virtual girlfriend."));
                    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");

                    Json(reply(
                        r#"[{"text":"Hey!","facialExpression":"smile","animation":"Talking_0"},{"text":"Miss me?","facialExpression":"funnyFace","animation":"Laughing"}]"#,
                    ))
                },
            ),
        );
        let address = spawn(router).await;

        let descriptors = provider(address).generate("Hello").await.unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].facial_expression, FacialExpression::Smile);
        assert_eq!(descriptors[1].animation, Animation::Laughing);
    }

    #[tokio::test]
    async fn error_status_is_provider_error() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
        );
        let address = spawn(router).await;

        let err = provider(address).generate("Hello").await.unwrap_err();

        assert!(matches!(err, DialogueError::Provider(ref m) if m.contains("403")));
        assert!(!err.is_format_error());
    }

    #[tokio::test]
    async fn prose_reply_is_format_error() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { Json(reply("Sorry, I can only chat in prose today.")) }),
        );
        let address = spawn(router).await;

        let err = provider(address).generate("Hello").await.unwrap_err();

        assert!(err.is_format_error());
    }

    #[tokio::test]
    async fn candidate_less_reply_is_provider_error() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { Json(json!({ "candidates": [{ "finishReason": "SAFETY" }] })) }),
        );
        let address = spawn(router).await;

        let err = provider(address).generate("Hello").await.unwrap_err();

        assert!(matches!(err, DialogueError::Provider(ref m) if m.contains("SAFETY")));
    }

    #[tokio::test]
    async fn configured_timeout_applies_to_shared_client() {
        let router = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(reply("[]"))
            }),
        );
        let address = spawn(router).await;
        let config = DialogueConfig {
            base_url: Some(format!("http://{address}/v1beta/").parse().unwrap()),
            timeout: Duration::from_millis(200),
            ..DialogueConfig::default()
        };

        let started = std::time::Instant::now();
        let err = GoogleProvider::new(&config, SecretString::from("gemini-key"))
            .generate("Hello")
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(matches!(err, DialogueError::Provider(ref m) if !m.contains("gemini-key")));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_a_request() {
        let address: SocketAddr = "127.0.0.1:9".parse().unwrap();

        let err = provider(address).generate("   ").await.unwrap_err();

        assert!(matches!(err, DialogueError::InvalidRequest(_)));
    }
}
