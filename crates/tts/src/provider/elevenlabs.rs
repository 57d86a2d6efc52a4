use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::TtsError,
    http_client::http_client,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// `ElevenLabs` TTS provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    voice_id: String,
    model_id: String,
    timeout: Duration,
}

impl ElevenLabsProvider {
    pub fn new(
        api_key: SecretString,
        base_url: Option<String>,
        voice_id: String,
        model_id: String,
        timeout: Duration,
    ) -> Self {
        let client = http_client();
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            api_key,
            voice_id,
            model_id,
            timeout,
        }
    }

    async fn check_status(response: Response) -> crate::error::Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("ElevenLabs API error ({status}): {error_text}");

        Err(match status.as_u16() {
            401 => TtsError::AuthenticationFailed(error_text),
            400 | 422 => TtsError::InvalidRequest(error_text),
            _ => TtsError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            },
        })
    }
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl TtsProvider for ElevenLabsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let url = format!("{}/text-to-speech/{}", self.base_url, self.voice_id);

        tracing::debug!(
            model = %self.model_id,
            voice = %self.voice_id,
            input_len = request.input.len(),
            "ElevenLabs TTS request"
        );

        let body = ElevenLabsRequest {
            text: &request.input,
            model_id: &self.model_id,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("xi-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("ElevenLabs request failed: {e}");
                TtsError::from_transport(&e, "ElevenLabs")
            })?;

        let response = Self::check_status(response).await?;

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read ElevenLabs response body: {e}");
            TtsError::from_transport(&e, "ElevenLabs")
        })?;

        tracing::debug!("ElevenLabs TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    async fn list_voices(&self) -> crate::error::Result<serde_json::Value> {
        let url = format!("{}/voices", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .header("xi-api-key", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("ElevenLabs voice listing failed: {e}");
                TtsError::from_transport(&e, "ElevenLabs")
            })?;

        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse ElevenLabs voice listing: {e}");
            TtsError::InternalError(None)
        })
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
