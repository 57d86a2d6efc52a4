#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

use wawa_config::{TtsConfig, TtsProviderType};

pub use error::{Result, TtsError};
pub use provider::{TtsProvider, elevenlabs::ElevenLabsProvider};
pub use types::{SpeechRequest, SpeechResponse};

/// Build the configured speech provider
///
/// Returns `None` when no API key is configured; callers answer with
/// canned responses instead of failing.
pub fn build_provider(config: &TtsConfig) -> Option<Arc<dyn TtsProvider>> {
    let Some(api_key) = config.api_key() else {
        tracing::warn!("No TTS API key configured, speech synthesis is disabled");
        return None;
    };

    let provider: Arc<dyn TtsProvider> = match config.provider_type {
        TtsProviderType::Elevenlabs => Arc::new(ElevenLabsProvider::new(
            api_key.clone(),
            config.base_url.clone(),
            config.voice_id.clone(),
            config.model_id.clone(),
            config.timeout,
        )),
    };

    tracing::debug!(provider = provider.name(), "TTS provider initialized");

    Some(provider)
}
