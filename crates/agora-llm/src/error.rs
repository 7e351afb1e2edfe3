//! Error types for agora-llm

use crate::catalog::ProviderKind;
use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Model id not present in the catalog
    #[error("model not found: {0}")]
    NotFound(String),

    /// No adapter registered for a provider the catalog references
    #[error("no adapter registered for provider: {0}")]
    UnknownProvider(ProviderKind),

    /// Non-success HTTP response from a provider
    #[error("{provider} api error (HTTP {status}): {message}")]
    ProviderApi {
        /// Provider that answered
        provider: ProviderKind,
        /// HTTP status code
        status: u16,
        /// Provider's own error message or body
        message: String,
    },

    /// Successful response that carried no usable content
    #[error("{provider} returned no content")]
    EmptyResponse {
        /// Provider that answered
        provider: ProviderKind,
    },

    /// Provider not configured (missing credential)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Catalog or routing rules are inconsistent
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Cancelled by the caller before the provider answered
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// HTTP status for provider errors, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map a transport error from reqwest, keeping timeouts distinct
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
