use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Speech synthesis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: TtsProviderType,
    /// API key; empty or absent switches `/chat` to the canned warning
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Voice used for every message
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Synthesis model
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Request timeout (e.g. "60s")
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider_type: TtsProviderType::default(),
            api_key: None,
            base_url: None,
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            timeout: default_timeout(),
        }
    }
}

impl TtsConfig {
    /// Configured API key, ignoring empty values
    pub fn api_key(&self) -> Option<&SecretString> {
        crate::non_empty(self.api_key.as_ref())
    }
}

/// Supported TTS providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// `ElevenLabs`
    #[default]
    Elevenlabs,
}

fn default_voice_id() -> String {
    "XB0fDUnXU5powFXDhCwa".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
