//! LLM integration for the coach.
//!
//! Supports:
//! - **Anthropic**: Messages API over `reqwest`
//!
//! Without an API key no provider is created and the coach answers from its
//! static fallback.

pub mod anthropic;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use provider::*;

use std::sync::Arc;

use secrecy::SecretString;

use crate::error::LlmError;

/// Default model for coaching replies.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
    /// Overrides the public API endpoint (proxies, local mocks).
    pub base_url: Option<String>,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let mut provider = AnthropicProvider::new(config.api_key.clone(), &config.model)?;
    if let Some(base_url) = &config.base_url {
        provider = provider.with_base_url(base_url);
        tracing::info!("Using Anthropic (model: {}, endpoint: {})", config.model, base_url);
    } else {
        tracing::info!("Using Anthropic (model: {})", config.model);
    }
    Ok(Arc::new(provider))
}
