#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod cors;
pub mod dialogue;
mod duration;
mod env;
pub mod health;
pub mod lipsync;
mod loader;
pub mod pipeline;
pub mod server;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use auth::*;
pub use cors::*;
pub use dialogue::*;
pub use health::*;
pub use lipsync::*;
pub use pipeline::*;
pub use server::*;
pub use telemetry::*;
pub use tts::*;

/// Top-level Wawa configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Dialogue generation (LLM) configuration
    #[serde(default)]
    pub dialogue: DialogueConfig,
    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// External tool locations for transcoding and lip-sync extraction
    #[serde(default)]
    pub lipsync: LipSyncConfig,
    /// Message pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Cookie-based JWT authentication
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

/// Treat an empty secret the same as an absent one
///
/// Placeholders like `{{ env.KEY | default("") }}` expand to an empty
/// string when the variable is unset.
pub(crate) fn non_empty(secret: Option<&secrecy::SecretString>) -> Option<&secrecy::SecretString> {
    use secrecy::ExposeSecret;

    secret.filter(|s| !s.expose_secret().trim().is_empty())
}
