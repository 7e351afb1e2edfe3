//! Agora LLM - model routing for the agent catalog
//!
//! This crate holds everything between a chat request and an LLM backend:
//! - Catalog: the immutable registry of models and which plans may use them
//! - Router: heuristic complexity scoring and plan-gated model selection
//! - Providers: DeepSeek, Anthropic and Google Gemini adapters behind one trait
//! - Dispatch: resolves a model to its adapter, times and forwards the call
//! - Cost: per-request USD estimation, including tiered long-context pricing

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod completion;
pub mod cost;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod providers;
pub mod router;
pub mod util;

pub use catalog::{
    CapabilityLevel, Capabilities, ModelCatalog, ModelDescriptor, Multimodality, Plan, Pricing,
    ProviderKind, TieredPricing,
};
pub use completion::{ChatRequest, ChatResponse, TokenUsage};
pub use cost::{estimate_cost, estimate_usage, CostEstimate, TokenCounts};
pub use dispatch::{DispatchResult, Dispatcher};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use providers::{ChatProvider, ProviderRegistry};
pub use router::{
    analyze, ModelRouter, RouteReason, RoutingAnalysis, RoutingDecision, RoutingRequest,
    RoutingRules,
};

// Re-export provider types
pub use providers::anthropic::{AnthropicConfig, AnthropicProvider};
pub use providers::deepseek::{DeepSeekConfig, DeepSeekProvider};
pub use providers::gemini::{GeminiConfig, GeminiProvider};
