//! Built-in model set
//!
//! Prices are USD per 1M tokens as published by each provider.

use super::types::{
    CapabilityLevel, Capabilities, ModelDescriptor, Multimodality, Plan, Pricing, ProviderKind,
    TieredPricing, DEFAULT_TIER_THRESHOLD,
};
use std::collections::BTreeMap;

/// Base economy model
pub const DEEPSEEK_CHAT: &str = "deepseek-chat";
/// Reasoning-tier economy model
pub const DEEPSEEK_REASONER: &str = "deepseek-reasoner";
/// Premium high-reasoning model
pub const CLAUDE_SONNET_4: &str = "claude-4-sonnet";
/// Multimodal mid-tier model
pub const GEMINI_25_FLASH: &str = "gemini-2.5-flash";
/// Native-multimodal premium model
pub const GEMINI_25_PRO: &str = "gemini-2.5-pro";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub(super) fn builtin_models() -> Vec<ModelDescriptor> {
    vec![
        // ====================================================================
        // DeepSeek - economy provider
        // ====================================================================
        ModelDescriptor {
            id: DEEPSEEK_CHAT.to_string(),
            provider: ProviderKind::DeepSeek,
            name: "DeepSeek V3".to_string(),
            api_model: None,
            pricing: Pricing {
                input: 0.27,
                output: 1.10,
                cache: Some(0.07),
                tiered: None,
            },
            capabilities: Capabilities {
                reasoning: CapabilityLevel::High,
                coding: CapabilityLevel::High,
                multimodal: Multimodality::None,
                context_window: 64_000,
                max_output: 8_000,
                languages: strings(&["es", "en", "pt", "zh"]),
            },
            strengths: strings(&["low cost", "fast answers", "general conversation"]),
            use_cases: strings(&["chat", "summaries", "drafting"]),
            premium: false,
        },
        ModelDescriptor {
            id: DEEPSEEK_REASONER.to_string(),
            provider: ProviderKind::DeepSeek,
            name: "DeepSeek R1".to_string(),
            api_model: None,
            pricing: Pricing {
                input: 0.55,
                output: 2.19,
                cache: Some(0.14),
                tiered: None,
            },
            capabilities: Capabilities {
                reasoning: CapabilityLevel::Exceptional,
                coding: CapabilityLevel::High,
                multimodal: Multimodality::None,
                context_window: 64_000,
                max_output: 8_000,
                languages: strings(&["es", "en", "pt", "zh"]),
            },
            strengths: strings(&["step-by-step reasoning", "math", "analysis"]),
            use_cases: strings(&["problem solving", "planning", "code review"]),
            premium: false,
        },
        // ====================================================================
        // Anthropic
        // ====================================================================
        ModelDescriptor {
            id: CLAUDE_SONNET_4.to_string(),
            provider: ProviderKind::Anthropic,
            name: "Claude Sonnet 4".to_string(),
            api_model: Some("claude-sonnet-4-20250514".to_string()),
            pricing: Pricing {
                input: 3.00,
                output: 15.00,
                cache: Some(0.30),
                tiered: None,
            },
            capabilities: Capabilities {
                reasoning: CapabilityLevel::Exceptional,
                coding: CapabilityLevel::Exceptional,
                multimodal: Multimodality::Supported,
                context_window: 200_000,
                max_output: 64_000,
                languages: strings(&["es", "en", "pt", "fr", "de", "it"]),
            },
            strengths: strings(&["careful reasoning", "long documents", "writing quality"]),
            use_cases: strings(&["legal analysis", "financial advice", "software architecture"]),
            premium: false,
        },
        // ====================================================================
        // Google Gemini
        // ====================================================================
        ModelDescriptor {
            id: GEMINI_25_FLASH.to_string(),
            provider: ProviderKind::Google,
            name: "Gemini 2.5 Flash".to_string(),
            api_model: None,
            pricing: Pricing {
                input: 0.30,
                output: 2.50,
                cache: Some(0.075),
                tiered: None,
            },
            capabilities: Capabilities {
                reasoning: CapabilityLevel::High,
                coding: CapabilityLevel::High,
                multimodal: Multimodality::Native,
                context_window: 1_048_576,
                max_output: 65_536,
                languages: strings(&["es", "en", "pt", "fr", "de", "it", "ja"]),
            },
            strengths: strings(&["speed", "large context", "image understanding"]),
            use_cases: strings(&["document extraction", "quick multimodal answers"]),
            premium: false,
        },
        ModelDescriptor {
            id: GEMINI_25_PRO.to_string(),
            provider: ProviderKind::Google,
            name: "Gemini 2.5 Pro".to_string(),
            api_model: None,
            pricing: Pricing {
                input: 1.25,
                output: 10.00,
                cache: Some(0.31),
                tiered: Some(TieredPricing {
                    threshold: DEFAULT_TIER_THRESHOLD,
                    input_large: 2.50,
                    output_large: 15.00,
                }),
            },
            capabilities: Capabilities {
                reasoning: CapabilityLevel::Exceptional,
                coding: CapabilityLevel::Exceptional,
                multimodal: Multimodality::Native,
                context_window: 1_048_576,
                max_output: 65_536,
                languages: strings(&["es", "en", "pt", "fr", "de", "it", "ja"]),
            },
            strengths: strings(&["video and audio understanding", "very long context"]),
            use_cases: strings(&["media analysis", "large document review"]),
            premium: true,
        },
    ]
}

pub(super) fn builtin_plan_access() -> BTreeMap<Plan, Vec<String>> {
    let entry = strings(&[DEEPSEEK_CHAT, DEEPSEEK_REASONER]);
    let mut mid = entry.clone();
    mid.extend(strings(&[CLAUDE_SONNET_4, GEMINI_25_FLASH]));
    let mut top = mid.clone();
    top.push(GEMINI_25_PRO.to_string());

    BTreeMap::from([(Plan::Entry, entry), (Plan::Mid, mid), (Plan::Top, top)])
}
