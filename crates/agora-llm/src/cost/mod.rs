//! Cost Estimation - per-request USD estimates
//!
//! Prices come from the catalog descriptor, so adapters never see them.
//!
//! # Module Structure
//!
//! - `estimate`: Rate selection and the [`CostEstimate`] result

mod estimate;


pub use estimate::{
    estimate_cost, estimate_usage, CostEstimate, TokenCounts, DEFAULT_OUTPUT_TOKENS,
    TOKENS_PER_MILLION,
};
