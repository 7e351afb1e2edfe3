//! Router - plan-gated model selection
//!
//! Routing is a pure function of the request: the same message, history,
//! plan and agent type always select the same catalog entry.
//!
//! # Module Structure
//!
//! - `types`: Request, analysis and decision types
//! - `rules`: Vocabularies, thresholds and branch targets
//! - `analysis`: Complexity scoring and modality detection
//! - `router_impl`: ModelRouter implementation

mod analysis;
mod router_impl;
mod rules;
mod types;


pub use analysis::analyze;
pub use router_impl::ModelRouter;
pub use rules::{RouteTargets, RoutingRules};
pub use types::{RouteReason, RoutingAnalysis, RoutingDecision, RoutingRequest};
