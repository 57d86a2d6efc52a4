//! Shared domain types for Wawa
//!
//! Message descriptors produced by dialogue generation, rendered messages
//! returned to the avatar client, and the error trait used to map domain
//! failures onto HTTP responses.

#![allow(clippy::must_use_candidate)]

mod error;
mod lipsync;
mod message;

pub use error::HttpError;
pub use lipsync::{LipSync, LipSyncParseError, MouthCue};
pub use message::{Animation, FacialExpression, MessageDescriptor, RenderedMessage, TextMessage};
