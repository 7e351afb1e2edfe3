//! Provider adapters
//!
//! Every backend sits behind [`ChatProvider`]. Adapters translate the
//! provider-neutral [`ChatRequest`] into their wire format and normalize the
//! reply; they know nothing about plans or pricing.
//!
//! # Module Structure
//!
//! - `deepseek` - OpenAI-compatible chat completions
//! - `anthropic` - Messages API
//! - `gemini` - generateContent API

/// Anthropic provider
pub mod anthropic;
/// DeepSeek provider
pub mod deepseek;
/// Google Gemini provider
pub mod gemini;

#[cfg(test)]
mod tests;

use crate::catalog::{ModelCatalog, ProviderKind};
use crate::completion::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Trait for chat backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Backend this adapter talks to
    fn kind(&self) -> ProviderKind;

    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Send one chat request and wait for the full reply
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Adapters keyed by provider
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ChatProvider>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.kinds())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one adapter per provider the catalog uses, reading credentials
    /// from the environment
    ///
    /// # Errors
    /// Returns [`Error::NotConfigured`] listing every missing variable.
    pub fn from_env(catalog: &ModelCatalog) -> Result<Self> {
        Self::build(catalog, |kind| {
            let provider: Arc<dyn ChatProvider> = match kind {
                ProviderKind::DeepSeek => Arc::new(deepseek::DeepSeekProvider::from_env()?),
                ProviderKind::Anthropic => Arc::new(anthropic::AnthropicProvider::from_env()?),
                ProviderKind::Google => Arc::new(gemini::GeminiProvider::from_env()?),
            };
            Ok(provider)
        })
    }

    /// Build one adapter per provider the catalog uses with a custom factory
    ///
    /// `NotConfigured` failures are collected so a single error names every
    /// missing credential; any other failure is returned as is.
    ///
    /// # Errors
    /// Returns the aggregated [`Error::NotConfigured`] or the first other
    /// factory error.
    pub fn build<F>(catalog: &ModelCatalog, mut factory: F) -> Result<Self>
    where
        F: FnMut(ProviderKind) -> Result<Arc<dyn ChatProvider>>,
    {
        let mut registry = Self::new();
        let mut missing = Vec::new();

        for kind in catalog.providers() {
            match factory(kind) {
                Ok(provider) => registry.register(provider),
                Err(Error::NotConfigured(what)) => missing.push(what),
                Err(e) => return Err(e),
            }
        }

        if !missing.is_empty() {
            return Err(Error::NotConfigured(missing.join("; ")));
        }

        Ok(registry)
    }

    /// Register an adapter under its own kind, replacing any previous one
    pub fn register(&mut self, provider: Arc<dyn ChatProvider>) {
        let kind = provider.kind();
        debug!(provider = %kind, "Registering chat provider");
        self.providers.insert(kind, provider);
    }

    /// Get the adapter for a provider
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ChatProvider>> {
        self.providers.get(&kind).cloned()
    }

    /// Check if a provider is registered
    #[must_use]
    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Registered providers in stable order
    #[must_use]
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered adapters
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no adapter is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
