//! Model router implementation
//!
//! Selection runs in strict priority order; the branch order is the
//! tie-break, so every request reaches exactly one branch.

use super::analysis::analyze;
use super::rules::RoutingRules;
use super::types::{RouteReason, RoutingAnalysis, RoutingDecision, RoutingRequest};
use crate::catalog::{ModelCatalog, ModelDescriptor, Plan};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Branch targets resolved against the catalog at construction
#[derive(Debug, Clone)]
struct ResolvedTargets {
    economy: Arc<ModelDescriptor>,
    entry_reasoner: Arc<ModelDescriptor>,
    multimodal: Arc<ModelDescriptor>,
    premium_reasoning: Arc<ModelDescriptor>,
    mid_reasoning: Arc<ModelDescriptor>,
}

/// Deterministic request router over a model catalog
#[derive(Debug, Clone)]
pub struct ModelRouter {
    catalog: Arc<ModelCatalog>,
    rules: RoutingRules,
    targets: ResolvedTargets,
}

impl ModelRouter {
    /// Create a router
    ///
    /// # Errors
    /// Returns [`Error::InvalidCatalog`] if a rule target is missing from the
    /// catalog or is not reachable from the plan whose branch selects it.
    pub fn new(catalog: Arc<ModelCatalog>, rules: RoutingRules) -> Result<Self> {
        let rules = rules.normalized();
        let t = &rules.targets;

        let resolve = |branch: &str, id: &str, plan: Plan| -> Result<Arc<ModelDescriptor>> {
            let model = catalog.get(id).cloned().ok_or_else(|| {
                Error::InvalidCatalog(format!("routing target {branch} -> {id} is not in the catalog"))
            })?;
            if !catalog.is_allowed(plan, id) {
                return Err(Error::InvalidCatalog(format!(
                    "routing target {branch} -> {id} is not available to plan {plan}"
                )));
            }
            Ok(model)
        };

        let targets = ResolvedTargets {
            economy: resolve("economy", &t.economy, Plan::Entry)?,
            entry_reasoner: resolve("entry_reasoner", &t.entry_reasoner, Plan::Entry)?,
            multimodal: resolve("multimodal", &t.multimodal, Plan::Top)?,
            premium_reasoning: resolve("premium_reasoning", &t.premium_reasoning, Plan::Mid)?,
            mid_reasoning: resolve("mid_reasoning", &t.mid_reasoning, Plan::Mid)?,
        };

        debug!(
            economy = %targets.economy.id,
            multimodal = %targets.multimodal.id,
            premium = %targets.premium_reasoning.id,
            "Model router initialized"
        );

        Ok(Self {
            catalog,
            rules,
            targets,
        })
    }

    /// The catalog this router selects from
    #[must_use]
    pub fn catalog(&self) -> &Arc<ModelCatalog> {
        &self.catalog
    }

    /// The active rules (keywords lowercased)
    #[must_use]
    pub fn rules(&self) -> &RoutingRules {
        &self.rules
    }

    /// Select a model for a request
    #[must_use]
    pub fn route(&self, request: &RoutingRequest) -> Arc<ModelDescriptor> {
        self.decide(request).model
    }

    /// Analyze a request without selecting
    #[must_use]
    pub fn analyze(&self, request: &RoutingRequest) -> RoutingAnalysis {
        analyze(request, &self.rules)
    }

    /// Select a model and report why
    #[instrument(skip(self, request), fields(plan = ?request.plan, agent = %request.agent_type))]
    pub fn decide(&self, request: &RoutingRequest) -> RoutingDecision {
        if let Some(forced) = request.force_model.as_deref() {
            match self.catalog.get(forced) {
                Some(model) => {
                    // Forced models skip plan gating; flag it so it shows up in audits.
                    if let Some(plan) = request.plan {
                        if !self.catalog.is_allowed(plan, forced) {
                            warn!(
                                model = forced,
                                plan = %plan,
                                "Forced model is outside the caller's plan"
                            );
                        }
                    }
                    info!(model = forced, reason = %RouteReason::Forced, "Selected model");
                    return RoutingDecision {
                        model: Arc::clone(model),
                        reason: RouteReason::Forced,
                        analysis: None,
                    };
                }
                None => {
                    warn!(model = forced, "Forced model not in catalog, routing normally");
                }
            }
        }

        let analysis = analyze(request, &self.rules);
        let (model, reason) = self.select(&analysis);

        debug!(
            complexity = analysis.complexity_score,
            multimodal = analysis.needs_multimodal,
            context_tokens = analysis.context_length,
            "Request analyzed"
        );
        info!(model = %model.id, reason = %reason, "Selected model");

        RoutingDecision {
            model: Arc::clone(model),
            reason,
            analysis: Some(analysis),
        }
    }

    fn select(&self, analysis: &RoutingAnalysis) -> (&Arc<ModelDescriptor>, RouteReason) {
        let targets = &self.targets;
        let score = analysis.complexity_score;

        match analysis.plan {
            // Entry plan never reaches the premium or multimodal branches.
            Some(Plan::Entry) => {
                return if score > self.rules.entry_reasoner_threshold {
                    (&targets.entry_reasoner, RouteReason::EntryReasoner)
                } else {
                    (&targets.economy, RouteReason::EntryEconomy)
                };
            }
            Some(Plan::Top) if analysis.needs_multimodal => {
                return (&targets.multimodal, RouteReason::Multimodal);
            }
            _ => {}
        }

        if score > self.rules.premium_threshold || self.rules.is_high_stakes(&analysis.agent_type) {
            (&targets.premium_reasoning, RouteReason::PremiumReasoning)
        } else if score > self.rules.mid_threshold {
            (&targets.mid_reasoning, RouteReason::MidReasoning)
        } else {
            (&targets.economy, RouteReason::Default)
        }
    }
}
