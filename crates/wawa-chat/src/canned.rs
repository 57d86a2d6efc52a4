use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use wawa_core::{Animation, FacialExpression, LipSync, MessageDescriptor, RenderedMessage, TextMessage};

use crate::error::CannedError;

/// One pre-recorded line, stored as `<name>.wav` and `<name>.json`
struct CannedLine {
    name: &'static str,
    text: &'static str,
    facial_expression: FacialExpression,
    animation: Animation,
}

impl CannedLine {
    fn descriptor(&self) -> MessageDescriptor {
        MessageDescriptor {
            text: self.text.to_owned(),
            facial_expression: self.facial_expression,
            animation: self.animation,
        }
    }
}

/// Greeting used when the user sent nothing
const INTRO: [CannedLine; 2] = [
    CannedLine {
        name: "intro_0",
        text: "Hey dear... How was your day?",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Talking1,
    },
    CannedLine {
        name: "intro_1",
        text: "I missed you so much... Please don't go for so long!",
        facial_expression: FacialExpression::Sad,
        animation: Animation::Crying,
    },
];

/// Reminder used when provider credentials are missing
const API_KEY_WARNING: [CannedLine; 2] = [
    CannedLine {
        name: "api_0",
        text: "Please my dear, don't forget to add your API keys!",
        facial_expression: FacialExpression::Angry,
        animation: Animation::Angry,
    },
    CannedLine {
        name: "api_1",
        text: "You don't want to ruin Wawa Sensei with a crazy bill, right?",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Laughing,
    },
];

/// Pre-recorded responses shipped in the assets directory
#[derive(Debug, Clone)]
pub struct CannedResponses {
    assets_dir: PathBuf,
}

impl CannedResponses {
    pub const fn new(assets_dir: PathBuf) -> Self {
        Self { assets_dir }
    }

    /// Greeting pair with audio and cues
    pub async fn intro(&self) -> Result<Vec<RenderedMessage>, CannedError> {
        self.load(&INTRO).await
    }

    /// Missing-credentials pair with audio and cues
    pub async fn api_key_warning(&self) -> Result<Vec<RenderedMessage>, CannedError> {
        self.load(&API_KEY_WARNING).await
    }

    /// Greeting pair as text only
    pub fn intro_texts() -> Vec<TextMessage> {
        INTRO.iter().map(|line| line.descriptor().into()).collect()
    }

    /// Missing-credentials pair as text only
    pub fn api_key_warning_texts() -> Vec<TextMessage> {
        API_KEY_WARNING.iter().map(|line| line.descriptor().into()).collect()
    }

    async fn load(&self, lines: &[CannedLine]) -> Result<Vec<RenderedMessage>, CannedError> {
        let mut messages = Vec::with_capacity(lines.len());

        for line in lines {
            let audio_path = self.assets_dir.join(format!("{}.wav", line.name));
            let cues_path = self.assets_dir.join(format!("{}.json", line.name));

            let audio = tokio::fs::read(&audio_path).await.map_err(|source| CannedError::Read {
                path: audio_path.clone(),
                source,
            })?;
            let cues = tokio::fs::read_to_string(&cues_path)
                .await
                .map_err(|source| CannedError::Read {
                    path: cues_path.clone(),
                    source,
                })?;

            let lipsync = LipSync::from_json(cues).map_err(|source| CannedError::Parse {
                path: cues_path.clone(),
                source,
            })?;

            messages.push(RenderedMessage::new(line.descriptor(), STANDARD.encode(audio), lipsync));
        }

        Ok(messages)
    }
}
