//! LLM provider resolution
//!
//! Builds one adapter per provider the catalog uses. Missing credentials are
//! collected and reported together at startup.

use super::config::LlmConfig;
use agora_llm::util::mask_api_key;
use agora_llm::{
    AnthropicConfig, AnthropicProvider, ChatProvider, DeepSeekConfig, DeepSeekProvider,
    GeminiConfig, GeminiProvider, ModelCatalog, ProviderKind, ProviderRegistry,
};
use std::sync::Arc;
use tracing::info;

/// Build the provider registry from the environment plus `[llm]` overrides
pub fn build_registry(
    catalog: &ModelCatalog,
    llm: &LlmConfig,
) -> agora_llm::Result<ProviderRegistry> {
    ProviderRegistry::build(catalog, |kind| {
        let provider: Arc<dyn ChatProvider> = match kind {
            ProviderKind::DeepSeek => {
                let mut config = DeepSeekConfig::from_env()?;
                if let Some(url) = &llm.deepseek_base_url {
                    config = config.with_base_url(url.as_str());
                }
                if let Some(timeout) = llm.client_timeout() {
                    config = config.with_timeout(timeout);
                }
                Arc::new(DeepSeekProvider::new(config)?)
            }
            ProviderKind::Anthropic => {
                let mut config = AnthropicConfig::from_env()?;
                if let Some(url) = &llm.anthropic_base_url {
                    config = config.with_base_url(url.as_str());
                }
                if let Some(timeout) = llm.client_timeout() {
                    config = config.with_timeout(timeout);
                }
                Arc::new(AnthropicProvider::new(config)?)
            }
            ProviderKind::Google => {
                let mut config = GeminiConfig::from_env()?;
                if let Some(url) = &llm.gemini_base_url {
                    config = config.with_base_url(url.as_str());
                }
                if let Some(timeout) = llm.client_timeout() {
                    config = config.with_timeout(timeout);
                }
                Arc::new(GeminiProvider::new(config)?)
            }
        };
        info!(provider = %kind, "Registered {} provider", provider.name());
        Ok(provider)
    })
}

/// Credential state of one provider, for diagnostics
#[derive(Debug, Clone)]
pub struct CredentialStatus {
    pub provider: ProviderKind,
    /// Masked key when present, otherwise what is missing
    pub detail: String,
    pub configured: bool,
}

/// Check every provider the catalog uses without building clients
pub fn credential_status(catalog: &ModelCatalog) -> Vec<CredentialStatus> {
    catalog
        .providers()
        .into_iter()
        .map(|provider| {
            let key = match provider {
                ProviderKind::DeepSeek => DeepSeekConfig::from_env().map(|c| c.api_key),
                ProviderKind::Anthropic => AnthropicConfig::from_env().map(|c| c.api_key),
                ProviderKind::Google => GeminiConfig::from_env().map(|c| c.api_key),
            };
            match key {
                Ok(key) => CredentialStatus {
                    provider,
                    detail: mask_api_key(&key),
                    configured: true,
                },
                Err(e) => CredentialStatus {
                    provider,
                    detail: e.to_string(),
                    configured: false,
                },
            }
        })
        .collect()
}
