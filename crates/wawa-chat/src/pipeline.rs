use std::sync::Arc;
use std::time::Instant;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures_util::{StreamExt, TryStreamExt, stream};
use lipsync::{AudioTranscoder, LipSyncExtractor};
use tts::{SpeechRequest, TtsProvider};
use wawa_core::{MessageDescriptor, RenderedMessage};
use wawa_telemetry::{PipelineMetrics, metrics::stage};

use crate::error::PipelineError;
use crate::scratch::{ScratchDir, ScratchSpace};

/// Renders dialogue descriptors into messages with audio and lip-sync cues
///
/// Each descriptor goes through synthesis, transcoding and cue extraction
/// in order. Up to `concurrency` descriptors are rendered at once; the
/// output keeps the input order.
pub struct MessagePipeline {
    tts: Arc<dyn TtsProvider>,
    transcoder: Arc<dyn AudioTranscoder>,
    extractor: Arc<dyn LipSyncExtractor>,
    scratch: ScratchSpace,
    concurrency: usize,
}

impl MessagePipeline {
    pub fn new(
        tts: Arc<dyn TtsProvider>,
        transcoder: Arc<dyn AudioTranscoder>,
        extractor: Arc<dyn LipSyncExtractor>,
        scratch: ScratchSpace,
        concurrency: usize,
    ) -> Self {
        Self {
            tts,
            transcoder,
            extractor,
            scratch,
            concurrency: concurrency.max(1),
        }
    }

    /// Render every descriptor, or fail as a whole
    ///
    /// On the first failing stage the remaining chains are dropped, which
    /// kills their child processes, and the scratch directory is removed.
    pub async fn render(&self, descriptors: Vec<MessageDescriptor>) -> Result<Vec<RenderedMessage>, PipelineError> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }

        let metrics = PipelineMetrics::global();
        let start = Instant::now();
        let count = descriptors.len();

        let scratch = self.scratch.create().await.map_err(PipelineError::Scratch)?;

        let result = stream::iter(descriptors.into_iter().enumerate())
            .map(|(index, descriptor)| self.render_one(&scratch, index, descriptor))
            .buffer_unordered(self.concurrency)
            .try_collect::<Vec<_>>()
            .await;

        scratch.close();

        match result {
            Ok(mut rendered) => {
                rendered.sort_unstable_by_key(|(index, _)| *index);
                metrics.record_request(count, start);
                tracing::info!(
                    messages = count,
                    elapsed_ms = start.elapsed().as_millis(),
                    "reply rendered"
                );
                Ok(rendered.into_iter().map(|(_, message)| message).collect())
            }
            Err(e) => {
                metrics.record_failure(e.kind());
                tracing::warn!(kind = e.kind(), index = ?e.index(), error = %e, "rendering aborted");
                Err(e)
            }
        }
    }

    async fn render_one(
        &self,
        scratch: &ScratchDir,
        index: usize,
        descriptor: MessageDescriptor,
    ) -> Result<(usize, RenderedMessage), PipelineError> {
        let metrics = PipelineMetrics::global();
        let mp3 = scratch.artifact(index, "mp3");
        let wav = scratch.artifact(index, "wav");
        let cues = scratch.artifact(index, "json");

        let started = Instant::now();
        let speech = self
            .tts
            .synthesize(SpeechRequest::new(descriptor.text.clone()))
            .await
            .map_err(|source| PipelineError::Synthesis { index, source })?;
        tokio::fs::write(&mp3, &speech.audio)
            .await
            .map_err(|source| PipelineError::Io {
                index,
                path: mp3.clone(),
                source,
            })?;
        metrics.record_stage(stage::SYNTHESIZE, started);
        tracing::debug!(index, bytes = speech.audio.len(), elapsed_ms = started.elapsed().as_millis(), "speech synthesized");

        let started = Instant::now();
        self.transcoder
            .transcode(&mp3, &wav)
            .await
            .map_err(|source| PipelineError::Tool { index, source })?;
        metrics.record_stage(stage::TRANSCODE, started);
        tracing::debug!(index, elapsed_ms = started.elapsed().as_millis(), "audio transcoded");

        let started = Instant::now();
        let lipsync = self
            .extractor
            .extract(&wav, &cues)
            .await
            .map_err(|source| PipelineError::LipSync { index, source })?;
        metrics.record_stage(stage::LIPSYNC, started);
        tracing::debug!(index, elapsed_ms = started.elapsed().as_millis(), "lip-sync extracted");

        let audio = tokio::fs::read(&wav).await.map_err(|source| PipelineError::Io {
            index,
            path: wav.clone(),
            source,
        })?;

        Ok((index, RenderedMessage::new(descriptor, STANDARD.encode(audio), lipsync)))
    }
}
