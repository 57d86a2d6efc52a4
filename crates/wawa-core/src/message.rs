use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::LipSync;

/// Facial expression the avatar wears while speaking a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FacialExpression {
    Smile,
    Sad,
    Angry,
    Surprised,
    FunnyFace,
    #[default]
    Default,
}

/// Body animation played alongside a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
pub enum Animation {
    #[serde(rename = "Talking_0")]
    #[strum(serialize = "Talking_0")]
    Talking0,
    #[serde(rename = "Talking_1")]
    #[strum(serialize = "Talking_1")]
    Talking1,
    #[serde(rename = "Talking_2")]
    #[strum(serialize = "Talking_2")]
    Talking2,
    Crying,
    Laughing,
    Rumba,
    #[default]
    Idle,
    Terrified,
    Angry,
}

impl FacialExpression {
    /// Wire names of every expression, in declaration order
    pub fn names() -> &'static [&'static str] {
        Self::VARIANTS
    }
}

impl Animation {
    /// Wire names of every animation, in declaration order
    pub fn names() -> &'static [&'static str] {
        Self::VARIANTS
    }
}

/// One scripted line of dialogue before audio rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDescriptor {
    /// Text the avatar speaks
    pub text: String,
    /// Expression shown while speaking
    #[serde(default)]
    pub facial_expression: FacialExpression,
    /// Animation played while speaking
    #[serde(default)]
    pub animation: Animation,
}

/// A descriptor enriched with synthesized audio and lip-sync timing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMessage {
    pub text: String,
    pub facial_expression: FacialExpression,
    pub animation: Animation,
    /// Base64-encoded audio bytes
    pub audio: String,
    /// Cue document as written by the lip-sync tool
    pub lipsync: LipSync,
}

impl RenderedMessage {
    /// Attach rendered audio and cues to a descriptor
    pub fn new(descriptor: MessageDescriptor, audio: String, lipsync: LipSync) -> Self {
        Self {
            text: descriptor.text,
            facial_expression: descriptor.facial_expression,
            animation: descriptor.animation,
            audio,
            lipsync,
        }
    }
}

/// Text-only message for clients that render audio themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessage {
    pub text: String,
}

impl From<MessageDescriptor> for TextMessage {
    fn from(descriptor: MessageDescriptor) -> Self {
        Self { text: descriptor.text }
    }
}
