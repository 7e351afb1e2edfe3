//! Catalog types
//!
//! Descriptors for invocable models, subscription plans and the capability
//! metadata the router and cost estimator read.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input-token count above which tiered models switch to their large rates
pub const DEFAULT_TIER_THRESHOLD: u64 = 200_000;

// ============================================================================
// Provider
// ============================================================================

/// LLM backend family; each maps to exactly one adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DeepSeek (OpenAI-compatible chat completions)
    DeepSeek,
    /// Anthropic Messages API
    Anthropic,
    /// Google Gemini generateContent API
    Google,
}

impl ProviderKind {
    /// All provider kinds
    pub const ALL: [ProviderKind; 3] = [Self::DeepSeek, Self::Anthropic, Self::Google];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Subscription plan tier
///
/// Ordered by privilege: `Entry < Mid < Top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Lowest tier (free / basic)
    Entry,
    /// Middle tier (pro)
    Mid,
    /// Highest tier (premium / enterprise)
    Top,
}

impl Plan {
    /// All plans, lowest first
    pub const ALL: [Plan; 3] = [Self::Entry, Self::Mid, Self::Top];

    /// Parse a plan name as the billing layer spells it
    ///
    /// Unknown names yield `None`; the router treats those permissively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "entry" | "free" | "basic" => Some(Self::Entry),
            "mid" | "pro" | "standard" => Some(Self::Mid),
            "top" | "premium" | "enterprise" => Some(Self::Top),
            _ => None,
        }
    }

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Ordinal capability rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityLevel {
    /// Adequate for simple requests
    Low,
    /// Strong general performance
    High,
    /// Best available
    Exceptional,
}

/// Non-text input support
///
/// Serialized as `false`, `true` or `"native"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Multimodality {
    /// Text only
    None,
    /// Accepts images/documents
    Supported,
    /// Trained natively on image, audio and video
    Native,
}

impl Multimodality {
    /// Whether any non-text input is accepted
    #[must_use]
    pub fn is_multimodal(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Serialize for Multimodality {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_bool(false),
            Self::Supported => serializer.serialize_bool(true),
            Self::Native => serializer.serialize_str("native"),
        }
    }
}

impl<'de> Deserialize<'de> for Multimodality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => Ok(Self::None),
            Repr::Flag(true) => Ok(Self::Supported),
            Repr::Label(label) if label == "native" => Ok(Self::Native),
            Repr::Label(other) => Err(de::Error::custom(format!(
                "invalid multimodal value: {other}"
            ))),
        }
    }
}

/// Capability metadata for a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Reasoning tier
    pub reasoning: CapabilityLevel,
    /// Coding tier
    pub coding: CapabilityLevel,
    /// Non-text input support
    pub multimodal: Multimodality,
    /// Maximum input tokens
    pub context_window: u32,
    /// Maximum output tokens
    pub max_output: u32,
    /// Supported languages (ISO 639-1)
    #[serde(default)]
    pub languages: Vec<String>,
}

// ============================================================================
// Pricing
// ============================================================================

/// Long-context rates applied above `threshold` input tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredPricing {
    /// Input-token count above which the large rates apply (exclusive)
    pub threshold: u64,
    /// Input price per 1M tokens above the threshold (USD)
    pub input_large: f64,
    /// Output price per 1M tokens above the threshold (USD)
    pub output_large: f64,
}

/// Pricing per 1M tokens (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Input price per 1M tokens
    pub input: f64,
    /// Output price per 1M tokens
    pub output: f64,
    /// Cached-input price per 1M tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<f64>,
    /// Context-length dependent rates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiered: Option<TieredPricing>,
}

// ============================================================================
// Model Descriptor
// ============================================================================

/// One invocable LLM backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable unique key (e.g. "deepseek-chat")
    pub id: String,
    /// Adapter that handles this model
    pub provider: ProviderKind,
    /// Display name
    pub name: String,
    /// Model name sent to the provider, when it differs from `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_model: Option<String>,
    /// Pricing
    pub pricing: Pricing,
    /// Capabilities
    pub capabilities: Capabilities,
    /// What the model is good at
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Typical use cases
    #[serde(default)]
    pub use_cases: Vec<String>,
    /// Restricted to the top plan
    #[serde(default)]
    pub premium: bool,
}

impl ModelDescriptor {
    /// Model name to put on the wire
    #[must_use]
    pub fn api_model(&self) -> &str {
        self.api_model.as_deref().unwrap_or(&self.id)
    }

    /// Whether the model accepts non-text input
    #[must_use]
    pub fn is_multimodal(&self) -> bool {
        self.capabilities.multimodal.is_multimodal()
    }

    /// Whether the model has context-length dependent pricing
    #[must_use]
    pub fn has_tiered_pricing(&self) -> bool {
        self.pricing.tiered.is_some()
    }
}
