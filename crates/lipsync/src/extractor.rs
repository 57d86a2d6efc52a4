use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wawa_config::LipSyncConfig;
use wawa_core::{LipSync, LipSyncParseError};

use crate::process::{ProcessRunner, ToolError};

/// Failure producing a cue document
#[derive(Debug, thiserror::Error)]
pub enum LipSyncError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The tool exited cleanly but its output file is unreadable
    #[error("failed to read cue file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file is not a cue document
    #[error("invalid cue file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: LipSyncParseError,
    },
}

/// Derives mouth cue timing from speech audio
#[async_trait]
pub trait LipSyncExtractor: Send + Sync {
    /// Analyze `audio`, write the cue document to `output` and return it
    async fn extract(&self, audio: &Path, output: &Path) -> Result<LipSync, LipSyncError>;
}

/// Rhubarb Lip Sync command line tool
#[derive(Debug, Clone)]
pub struct RhubarbExtractor {
    program: PathBuf,
    recognizer: String,
    runner: ProcessRunner,
}

impl RhubarbExtractor {
    pub const fn new(program: PathBuf, recognizer: String, runner: ProcessRunner) -> Self {
        Self {
            program,
            recognizer,
            runner,
        }
    }

    pub fn from_config(config: &LipSyncConfig) -> Self {
        Self::new(
            config.rhubarb_path.clone(),
            config.recognizer.clone(),
            ProcessRunner::new(config.timeout),
        )
    }
}

#[async_trait]
impl LipSyncExtractor for RhubarbExtractor {
    async fn extract(&self, audio: &Path, output: &Path) -> Result<LipSync, LipSyncError> {
        let args: [&OsStr; 7] = [
            "-f".as_ref(),
            "json".as_ref(),
            "-o".as_ref(),
            output.as_os_str(),
            audio.as_os_str(),
            "-r".as_ref(),
            self.recognizer.as_ref(),
        ];

        self.runner.run(&self.program, &args).await?;

        let text = tokio::fs::read_to_string(output)
            .await
            .map_err(|source| LipSyncError::Read {
                path: output.to_path_buf(),
                source,
            })?;

        LipSync::from_json(text).map_err(|source| LipSyncError::Parse {
            path: output.to_path_buf(),
            source,
        })
    }
}
