use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Locations and limits for the external audio tools
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LipSyncConfig {
    /// `ffmpeg` executable used to transcode synthesized audio to WAV
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Rhubarb Lip Sync executable
    #[serde(default = "default_rhubarb_path")]
    pub rhubarb_path: PathBuf,
    /// Rhubarb recognizer (`phonetic` or `pocketSphinx`)
    #[serde(default = "default_recognizer")]
    pub recognizer: String,
    /// Upper bound on a single tool invocation (e.g. "60s")
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

impl Default for LipSyncConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            rhubarb_path: default_rhubarb_path(),
            recognizer: default_recognizer(),
            timeout: default_timeout(),
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_rhubarb_path() -> PathBuf {
    PathBuf::from("bin/rhubarb")
}

fn default_recognizer() -> String {
    "phonetic".to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
