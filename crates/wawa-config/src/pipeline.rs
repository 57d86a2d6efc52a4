use std::path::PathBuf;

use serde::Deserialize;

/// Message pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the pre-recorded canned responses
    /// (`intro_0.wav`, `intro_0.json`, ...)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Parent directory for per-request scratch directories;
    /// defaults to the system temp directory
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    /// How many messages of one reply are rendered at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            scratch_dir: None,
            concurrency: default_concurrency(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("audios")
}

const fn default_concurrency() -> usize {
    3
}
