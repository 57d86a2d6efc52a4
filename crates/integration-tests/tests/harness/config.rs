//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use wawa_config::{
    AuthConfig, Config, CorsConfig, DialogueConfig, HealthConfig, LipSyncConfig, PipelineConfig, ServerConfig,
    TtsConfig,
};

use super::tools;

/// Builder for constructing test configurations
///
/// Starts without provider keys, with the fake tools and canned assets.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                dialogue: DialogueConfig::default(),
                tts: TtsConfig::default(),
                lipsync: LipSyncConfig {
                    ffmpeg_path: tools::ffmpeg(),
                    rhubarb_path: tools::rhubarb(),
                    ..LipSyncConfig::default()
                },
                pipeline: PipelineConfig {
                    assets_dir: tools::assets_dir(),
                    ..PipelineConfig::default()
                },
                auth: None,
                telemetry: None,
            },
        }
    }

    /// Point dialogue generation at a mock Gemini backend
    pub fn with_gemini(mut self, base_url: &str) -> Self {
        self.config.dialogue.api_key = Some(SecretString::from("gemini-test-key"));
        self.config.dialogue.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Point speech synthesis at a mock ElevenLabs backend
    pub fn with_elevenlabs(mut self, base_url: &str) -> Self {
        self.config.tts.api_key = Some(SecretString::from("eleven-test-key"));
        self.config.tts.base_url = Some(base_url.to_owned());
        self
    }

    pub fn with_ffmpeg(mut self, path: PathBuf) -> Self {
        self.config.lipsync.ffmpeg_path = path;
        self
    }

    pub fn with_rhubarb(mut self, path: PathBuf) -> Self {
        self.config.lipsync.rhubarb_path = path;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.config.lipsync.timeout = timeout;
        self
    }

    /// Keep per-request scratch directories under `dir`
    pub fn with_scratch_dir(mut self, dir: &Path) -> Self {
        self.config.pipeline.scratch_dir = Some(dir.to_path_buf());
        self
    }

    /// Enable cookie auth with a user database at `database_path`
    pub fn with_auth(mut self, secret: &str, database_path: &Path) -> Self {
        self.config.auth = Some(AuthConfig {
            jwt_secret: Some(SecretString::from(secret)),
            database_path: database_path.to_path_buf(),
            ..AuthConfig::default()
        });
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
