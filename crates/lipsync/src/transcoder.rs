use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wawa_config::LipSyncConfig;

use crate::process::{ProcessRunner, ToolError};

/// Converts synthesized audio into the format the lip-sync tool reads
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Convert `input` and write the result to `output`
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), ToolError>;
}

/// `ffmpeg` based transcoder, output format follows the output extension
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    runner: ProcessRunner,
}

impl FfmpegTranscoder {
    pub const fn new(program: PathBuf, runner: ProcessRunner) -> Self {
        Self { program, runner }
    }

    pub fn from_config(config: &LipSyncConfig) -> Self {
        Self::new(config.ffmpeg_path.clone(), ProcessRunner::new(config.timeout))
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        let args: [&OsStr; 4] = ["-y".as_ref(), "-i".as_ref(), input.as_os_str(), output.as_os_str()];

        self.runner.run(&self.program, &args).await?;

        Ok(())
    }
}
