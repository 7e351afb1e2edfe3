//! Cost estimate calculation

use crate::catalog::{ModelDescriptor, Pricing, TieredPricing};
use crate::completion::TokenUsage;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Prices are quoted per this many tokens
pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Output tokens assumed when only the input size is known
pub const DEFAULT_OUTPUT_TOKENS: u64 = 1_000;

/// Token counts an estimate was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    /// Input tokens
    pub input: u64,
    /// Output tokens
    pub output: u64,
}

/// Estimated cost of one request in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Input leg
    pub input_cost: f64,
    /// Output leg
    pub output_cost: f64,
    /// `input_cost + output_cost`
    pub total_cost: f64,
    /// Display name of the model
    pub model: String,
    /// Token counts used
    pub tokens: TokenCounts,
    /// Whether the long-context rates were applied
    pub tiered: bool,
}

impl CostEstimate {
    /// Estimate for an input size with the default output budget and no cache
    #[must_use]
    pub fn for_input(model: &ModelDescriptor, input_tokens: u64) -> Self {
        estimate_cost(model, input_tokens, DEFAULT_OUTPUT_TOKENS, false)
    }

    fn new(
        model: &ModelDescriptor,
        tokens: TokenCounts,
        input_cost: f64,
        output_cost: f64,
        tiered: bool,
    ) -> Self {
        Self {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            model: model.name.clone(),
            tokens,
            tiered,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn cost_of(tokens: u64, price_per_million: f64) -> f64 {
    tokens as f64 / TOKENS_PER_MILLION * price_per_million
}

/// Large-context tier, when the input exceeds its threshold
fn active_tier(pricing: &Pricing, input_tokens: u64) -> Option<&TieredPricing> {
    pricing
        .tiered
        .as_ref()
        .filter(|tier| input_tokens > tier.threshold)
}

/// Estimate the cost of a request
///
/// Above a tiered model's threshold both legs use the large rates and the
/// cache rate is ignored. Otherwise input is billed at the cache rate when
/// `use_cache` is set and the model has one.
#[must_use]
pub fn estimate_cost(
    model: &ModelDescriptor,
    input_tokens: u64,
    output_tokens: u64,
    use_cache: bool,
) -> CostEstimate {
    let pricing = &model.pricing;
    let tokens = TokenCounts {
        input: input_tokens,
        output: output_tokens,
    };

    if let Some(tier) = active_tier(pricing, input_tokens) {
        return CostEstimate::new(
            model,
            tokens,
            cost_of(input_tokens, tier.input_large),
            cost_of(output_tokens, tier.output_large),
            true,
        );
    }

    let input_rate = match pricing.cache {
        Some(cache) if use_cache => cache,
        _ => pricing.input,
    };

    CostEstimate::new(
        model,
        tokens,
        cost_of(input_tokens, input_rate),
        cost_of(output_tokens, pricing.output),
        false,
    )
}

/// Estimate the cost of a completed call from the usage the provider reported
///
/// Prompt tokens the provider served from cache are billed at the cache rate
/// (or the input rate for models without one); the tier rule is the same as
/// [`estimate_cost`].
#[must_use]
pub fn estimate_usage(model: &ModelDescriptor, usage: &TokenUsage) -> CostEstimate {
    let pricing = &model.pricing;
    let input = u64::from(usage.prompt_tokens);
    let output = u64::from(usage.completion_tokens);
    let tokens = TokenCounts { input, output };

    if let Some(tier) = active_tier(pricing, input) {
        return CostEstimate::new(
            model,
            tokens,
            cost_of(input, tier.input_large),
            cost_of(output, tier.output_large),
            true,
        );
    }

    let cached = u64::from(usage.cached_tokens.unwrap_or(0)).min(input);
    let cache_rate = pricing.cache.unwrap_or(pricing.input);
    let input_cost = cost_of(input - cached, pricing.input) + cost_of(cached, cache_rate);

    CostEstimate::new(
        model,
        tokens,
        input_cost,
        cost_of(output, pricing.output),
        false,
    )
}
