//! In-memory stand-ins for the external collaborators

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lipsync::{AudioTranscoder, LipSyncError, LipSyncExtractor, ToolError};
use tts::{SpeechRequest, SpeechResponse, TtsError, TtsProvider};
use wawa_core::LipSync;

pub const CUES: &str = r#"{"metadata":{"soundFile":"message.wav","duration":0.4},"mouthCues":[{"start":0.0,"end":0.4,"value":"C"}]}"#;

/// Returns `audio:<text>`; texts "slow" and "medium" take longer
#[derive(Default)]
pub struct FakeTts {
    pub calls: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    in_flight: AtomicUsize,
    fail_on: Mutex<Option<String>>,
}

impl FakeTts {
    pub fn fail_on(&self, text: &str) {
        *self.fail_on.lock().unwrap() = Some(text.to_owned());
    }
}

#[async_trait]
impl TtsProvider for FakeTts {
    async fn synthesize(&self, request: SpeechRequest) -> tts::Result<SpeechResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = match request.input.as_str() {
            "slow" => 150,
            "medium" => 75,
            _ => 10,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.lock().unwrap().as_deref() == Some(request.input.as_str()) {
            return Err(TtsError::ProviderApiError {
                status: 500,
                message: "synthesis failed".to_owned(),
            });
        }

        Ok(SpeechResponse {
            audio: format!("audio:{}", request.input).into_bytes(),
            content_type: "audio/mpeg".to_owned(),
        })
    }

    async fn list_voices(&self) -> tts::Result<serde_json::Value> {
        Ok(serde_json::json!({ "voices": [{ "voice_id": "fake", "name": "Fake" }] }))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Copies the input file to the output path, failing for one configured file name
#[derive(Default)]
pub struct FakeTranscoder {
    pub calls: AtomicUsize,
    fail_on: Mutex<Option<String>>,
}

impl FakeTranscoder {
    pub fn fail_on(&self, file_name: &str) {
        *self.fail_on.lock().unwrap() = Some(file_name.to_owned());
    }
}

#[async_trait]
impl AudioTranscoder for FakeTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let file_name = input.file_name().map(|n| n.to_string_lossy().into_owned());
        if file_name.is_some() && *self.fail_on.lock().unwrap() == file_name {
            return Err(ToolError::Io {
                command: "fake-ffmpeg".to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        tokio::fs::copy(input, output).await.map_err(|source| ToolError::Io {
            command: "fake-ffmpeg".to_owned(),
            source,
        })?;
        Ok(())
    }
}

/// Writes [`CUES`] next to the audio, failing for one configured file name
#[derive(Default)]
pub struct FakeExtractor {
    fail_on: Mutex<Option<String>>,
    seen_dirs: Mutex<Vec<PathBuf>>,
}

impl FakeExtractor {
    pub fn fail_on(&self, file_name: &str) {
        *self.fail_on.lock().unwrap() = Some(file_name.to_owned());
    }

    pub fn seen_dirs(&self) -> Vec<PathBuf> {
        self.seen_dirs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LipSyncExtractor for FakeExtractor {
    async fn extract(&self, audio: &Path, output: &Path) -> Result<LipSync, LipSyncError> {
        if let Some(dir) = audio.parent() {
            self.seen_dirs.lock().unwrap().push(dir.to_path_buf());
        }

        let file_name = audio.file_name().map(|n| n.to_string_lossy().into_owned());
        if file_name.is_some() && *self.fail_on.lock().unwrap() == file_name {
            let status = <std::process::ExitStatus as std::os::unix::process::ExitStatusExt>::from_raw(1 << 8);
            return Err(LipSyncError::Tool(ToolError::Failed {
                command: "fake-rhubarb".to_owned(),
                status,
                stderr: "cannot read audio".to_owned(),
            }));
        }

        tokio::fs::write(output, CUES).await.map_err(|source| LipSyncError::Read {
            path: output.to_path_buf(),
            source,
        })?;

        Ok(LipSync::from_json(CUES.to_owned()).unwrap())
    }
}
