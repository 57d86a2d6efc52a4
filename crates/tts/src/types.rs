/// Text to be spoken with the provider's configured voice
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub input: String,
}

impl SpeechRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

/// Raw audio response from a TTS provider
#[derive(Debug)]
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: String,
}
