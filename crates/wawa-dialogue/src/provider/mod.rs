//! Provider trait and implementations for dialogue backends

pub mod google;

use async_trait::async_trait;
use wawa_core::MessageDescriptor;

use crate::error::DialogueError;

/// Trait implemented by each dialogue backend
#[async_trait]
pub trait DialogueProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Generate an ordered, non-empty reply to a user message
    async fn generate(&self, message: &str) -> Result<Vec<MessageDescriptor>, DialogueError>;
}
