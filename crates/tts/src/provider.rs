pub mod elevenlabs;

use async_trait::async_trait;

use crate::types::{SpeechRequest, SpeechResponse};

/// Trait for TTS provider implementations
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize text to speech
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse>;

    /// List the voices available to the configured account
    ///
    /// The provider's response is passed through unchanged.
    async fn list_voices(&self) -> crate::error::Result<serde_json::Value>;

    /// Get the provider name
    fn name(&self) -> &str;
}
