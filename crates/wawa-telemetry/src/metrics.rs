//! Metric names and recording helpers for the message pipeline

use std::sync::OnceLock;
use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram};

// Pipeline metric names
pub const PIPELINE_STAGE_DURATION: &str = "wawa.pipeline.stage.duration";
pub const PIPELINE_REQUEST_DURATION: &str = "wawa.pipeline.request.duration";
pub const PIPELINE_FAILURES: &str = "wawa.pipeline.failures";

// Chat metric names
pub const CHAT_RESPONSES: &str = "wawa.chat.responses";

/// Stage labels used on `PIPELINE_STAGE_DURATION`
pub mod stage {
    pub const SYNTHESIZE: &str = "synthesize";
    pub const TRANSCODE: &str = "transcode";
    pub const LIPSYNC: &str = "lipsync";
}

/// Lazily created instruments on the global meter
pub struct PipelineMetrics {
    stage_duration: Histogram<f64>,
    request_duration: Histogram<f64>,
    failures: Counter<u64>,
    responses: Counter<u64>,
}

impl PipelineMetrics {
    /// Instruments registered on the global meter provider
    ///
    /// When telemetry export is not configured the global provider is a
    /// no-op and recording costs nothing.
    pub fn global() -> &'static Self {
        static METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

        METRICS.get_or_init(|| {
            let meter = opentelemetry::global::meter("wawa");

            Self {
                stage_duration: meter
                    .f64_histogram(PIPELINE_STAGE_DURATION)
                    .with_unit("s")
                    .with_description("Duration of one pipeline stage for one message")
                    .build(),
                request_duration: meter
                    .f64_histogram(PIPELINE_REQUEST_DURATION)
                    .with_unit("s")
                    .with_description("Duration of rendering a whole reply")
                    .build(),
                failures: meter
                    .u64_counter(PIPELINE_FAILURES)
                    .with_description("Pipelines aborted by a stage failure")
                    .build(),
                responses: meter
                    .u64_counter(CHAT_RESPONSES)
                    .with_description("Chat responses by kind")
                    .build(),
            }
        })
    }

    /// Record how long a stage took
    pub fn record_stage(&self, stage: &'static str, start: Instant) {
        self.stage_duration
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("stage", stage)]);
    }

    /// Record how long rendering a whole reply took
    pub fn record_request(&self, messages: usize, start: Instant) {
        #[allow(clippy::cast_possible_wrap)]
        let messages = messages as i64;
        self.request_duration
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("messages", messages)]);
    }

    /// Count an aborted pipeline by failure kind
    pub fn record_failure(&self, kind: &'static str) {
        self.failures.add(1, &[KeyValue::new("kind", kind)]);
    }

    /// Count a response by kind (`rendered`, `intro`, `credentials_missing`, ...)
    pub fn record_response(&self, kind: &'static str) {
        self.responses.add(1, &[KeyValue::new("kind", kind)]);
    }
}
