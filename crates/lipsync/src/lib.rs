//! External audio tooling
//!
//! Transcoding synthesized speech with `ffmpeg` and extracting mouth cues
//! with Rhubarb Lip Sync. Both tools are run as child processes with a
//! bounded timeout.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod extractor;
mod process;
mod transcoder;

pub use extractor::{LipSyncError, LipSyncExtractor, RhubarbExtractor};
pub use process::{ProcessRunner, ToolError};
pub use transcoder::{AudioTranscoder, FfmpegTranscoder};
