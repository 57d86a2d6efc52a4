//! Dialogue generation for Wawa
//!
//! Asks a hosted LLM for a short scripted reply and turns it into message
//! descriptors (text, facial expression and animation).

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod parse;
mod persona;
mod protocol;
mod provider;

use std::sync::Arc;

use wawa_config::{DialogueConfig, DialogueProviderType};

pub use error::DialogueError;
pub use parse::parse_descriptors;
pub use persona::default_persona;
pub use provider::{DialogueProvider, google::GoogleProvider};

/// Build the configured dialogue provider
///
/// Returns `None` when no API key is configured; callers answer with
/// canned responses instead of failing.
pub fn build_provider(config: &DialogueConfig) -> Option<Arc<dyn DialogueProvider>> {
    let Some(api_key) = config.api_key() else {
        tracing::warn!("No dialogue API key configured, generation is disabled");
        return None;
    };

    let provider: Arc<dyn DialogueProvider> = match config.provider_type {
        DialogueProviderType::Google => Arc::new(GoogleProvider::new(config, api_key.clone())),
    };

    tracing::debug!(provider = provider.name(), model = %config.model, "dialogue provider initialized");

    Some(provider)
}
