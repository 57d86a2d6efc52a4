use std::path::Path;
use std::time::Duration;

use crate::Config;

/// Recognizers understood by Rhubarb Lip Sync
const RECOGNIZERS: [&str; 2] = ["phonetic", "pocketSphinx"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Expand, deserialize and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_dialogue_config()?;
        self.validate_tts_config()?;
        self.validate_lipsync_config()?;
        self.validate_pipeline_config()?;
        self.validate_auth_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_dialogue_config(&self) -> anyhow::Result<()> {
        let dialogue = &self.dialogue;

        if !(1..=3).contains(&dialogue.max_messages) {
            anyhow::bail!("dialogue.max_messages must be between 1 and 3");
        }

        if !(0.0..=2.0).contains(&dialogue.generation.temperature) {
            anyhow::bail!("dialogue.generation.temperature must be between 0.0 and 2.0");
        }

        if dialogue.generation.top_p <= 0.0 || dialogue.generation.top_p > 1.0 {
            anyhow::bail!("dialogue.generation.top_p must be in (0.0, 1.0]");
        }

        if dialogue.model.trim().is_empty() {
            anyhow::bail!("dialogue.model must not be empty");
        }

        ensure_positive("dialogue.timeout", dialogue.timeout)
    }

    fn validate_tts_config(&self) -> anyhow::Result<()> {
        if self.tts.voice_id.trim().is_empty() {
            anyhow::bail!("tts.voice_id must not be empty");
        }

        ensure_positive("tts.timeout", self.tts.timeout)
    }

    fn validate_lipsync_config(&self) -> anyhow::Result<()> {
        if !RECOGNIZERS.contains(&self.lipsync.recognizer.as_str()) {
            anyhow::bail!(
                "lipsync.recognizer must be one of {}, got '{}'",
                RECOGNIZERS.join(", "),
                self.lipsync.recognizer
            );
        }

        ensure_positive("lipsync.timeout", self.lipsync.timeout)
    }

    fn validate_pipeline_config(&self) -> anyhow::Result<()> {
        if self.pipeline.concurrency == 0 {
            anyhow::bail!("pipeline.concurrency must be at least 1");
        }

        Ok(())
    }

    fn validate_auth_config(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.auth else {
            return Ok(());
        };

        if auth.cookie_name.trim().is_empty() {
            anyhow::bail!("auth.cookie_name must not be empty");
        }

        ensure_positive("auth.token_ttl", auth.token_ttl)
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&telemetry.tracing.sampling_rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0");
        }

        if telemetry.metrics_interval == 0 {
            anyhow::bail!("telemetry.metrics_interval must be greater than 0");
        }

        Ok(())
    }
}

fn ensure_positive(name: &str, value: Duration) -> anyhow::Result<()> {
    if value.is_zero() {
        anyhow::bail!("{name} must be greater than zero");
    }
    Ok(())
}
