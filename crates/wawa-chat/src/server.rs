use std::sync::Arc;

use lipsync::{AudioTranscoder, FfmpegTranscoder, LipSyncExtractor, RhubarbExtractor};
use tts::TtsProvider;
use wawa_core::{RenderedMessage, TextMessage};
use wawa_dialogue::DialogueProvider;
use wawa_telemetry::PipelineMetrics;

use crate::canned::CannedResponses;
use crate::error::ChatError;
use crate::pipeline::MessagePipeline;
use crate::scratch::ScratchSpace;

/// Chat service holding the configured collaborators
///
/// Providers are `None` when their API key is not configured.
pub struct ChatServer {
    dialogue: Option<Arc<dyn DialogueProvider>>,
    speech: Option<Arc<dyn TtsProvider>>,
    pipeline: Option<MessagePipeline>,
    canned: CannedResponses,
}

impl ChatServer {
    /// Answer a `/chat` request with rendered messages
    ///
    /// No input gets the greeting and missing credentials get the API key
    /// reminder, both without calling any provider.
    pub async fn chat(&self, input: Option<&str>) -> Result<Vec<RenderedMessage>, ChatError> {
        let metrics = PipelineMetrics::global();

        let Some(message) = input else {
            metrics.record_response("intro");
            return Ok(self.canned.intro().await?);
        };

        let (Some(dialogue), Some(pipeline)) = (&self.dialogue, &self.pipeline) else {
            tracing::warn!("provider credentials missing, answering with canned reminder");
            metrics.record_response("credentials_missing");
            return Ok(self.canned.api_key_warning().await?);
        };

        let descriptors = dialogue.generate(message).await?;
        tracing::debug!(messages = descriptors.len(), "dialogue received");

        let rendered = pipeline.render(descriptors).await?;
        metrics.record_response("rendered");

        Ok(rendered)
    }

    /// Answer a `/chat-bot` request with text only
    pub async fn chat_text(&self, input: Option<&str>) -> Result<Vec<TextMessage>, ChatError> {
        let metrics = PipelineMetrics::global();

        let Some(message) = input else {
            metrics.record_response("intro");
            return Ok(CannedResponses::intro_texts());
        };

        let Some(dialogue) = &self.dialogue else {
            tracing::warn!("dialogue credentials missing, answering with canned reminder");
            metrics.record_response("credentials_missing");
            return Ok(CannedResponses::api_key_warning_texts());
        };

        let descriptors = dialogue.generate(message).await?;
        metrics.record_response("text");

        Ok(descriptors.into_iter().map(TextMessage::from).collect())
    }

    /// Voices available to the speech provider account
    pub async fn voices(&self) -> Result<serde_json::Value, ChatError> {
        let speech = self.speech.as_ref().ok_or(ChatError::SpeechUnavailable)?;

        speech.list_voices().await.map_err(ChatError::Voices)
    }
}

/// Builder for constructing the chat server from configuration
///
/// Collaborators default to the configured providers and tools and can be
/// replaced individually.
pub struct ChatServerBuilder<'a> {
    config: &'a wawa_config::Config,
    dialogue: Option<Arc<dyn DialogueProvider>>,
    speech: Option<Arc<dyn TtsProvider>>,
    transcoder: Arc<dyn AudioTranscoder>,
    extractor: Arc<dyn LipSyncExtractor>,
}

impl<'a> ChatServerBuilder<'a> {
    pub fn new(config: &'a wawa_config::Config) -> Self {
        Self {
            config,
            dialogue: wawa_dialogue::build_provider(&config.dialogue),
            speech: tts::build_provider(&config.tts),
            transcoder: Arc::new(FfmpegTranscoder::from_config(&config.lipsync)),
            extractor: Arc::new(RhubarbExtractor::from_config(&config.lipsync)),
        }
    }

    #[must_use]
    pub fn dialogue(mut self, provider: Option<Arc<dyn DialogueProvider>>) -> Self {
        self.dialogue = provider;
        self
    }

    #[must_use]
    pub fn speech(mut self, provider: Option<Arc<dyn TtsProvider>>) -> Self {
        self.speech = provider;
        self
    }

    #[must_use]
    pub fn transcoder(mut self, transcoder: Arc<dyn AudioTranscoder>) -> Self {
        self.transcoder = transcoder;
        self
    }

    #[must_use]
    pub fn extractor(mut self, extractor: Arc<dyn LipSyncExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn build(self) -> ChatServer {
        let config = self.config;
        let pipeline_config = &config.pipeline;

        let pipeline = self.speech.clone().map(|speech| {
            MessagePipeline::new(
                speech,
                self.transcoder,
                self.extractor,
                ScratchSpace::new(pipeline_config.scratch_dir.clone()),
                pipeline_config.concurrency,
            )
        });

        tracing::debug!(
            dialogue = self.dialogue.is_some(),
            speech = self.speech.is_some(),
            concurrency = pipeline_config.concurrency,
            "chat server initialized"
        );

        ChatServer {
            dialogue: self.dialogue,
            speech: self.speech,
            pipeline,
            canned: CannedResponses::new(pipeline_config.assets_dir.clone()),
        }
    }
}
