//! Anthropic - Claude API provider
//!
//! This module implements the Anthropic Messages API adapter using reqwest.

/// Request conversion
pub mod convert;
/// Provider implementation
pub mod provider;
/// API types and configuration
pub mod types;


pub use provider::AnthropicProvider;
pub use types::{AnthropicConfig, API_VERSION, DEFAULT_BASE_URL};
