use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Dialogue generation configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialogueConfig {
    /// Provider protocol type
    #[serde(rename = "type", default)]
    pub provider_type: DialogueProviderType,
    /// API key; empty or absent switches `/chat` to the canned warning
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Persona instruction replacing the built-in one
    #[serde(default)]
    pub persona: Option<String>,
    /// Upper bound on messages per reply
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
    /// Sampling parameters
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Request timeout (e.g. "60s")
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            provider_type: DialogueProviderType::default(),
            api_key: None,
            base_url: None,
            model: default_model(),
            persona: None,
            max_messages: default_max_messages(),
            generation: GenerationConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl DialogueConfig {
    /// Configured API key, ignoring empty values
    pub fn api_key(&self) -> Option<&SecretString> {
        crate::non_empty(self.api_key.as_ref())
    }
}

/// Supported dialogue providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueProviderType {
    /// Google Generative Language API
    #[default]
    Google,
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_max_messages() -> usize {
    3
}

const fn default_temperature() -> f64 {
    0.6
}

const fn default_top_p() -> f64 {
    0.95
}

const fn default_top_k() -> u32 {
    64
}

const fn default_max_output_tokens() -> u32 {
    8192
}

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
