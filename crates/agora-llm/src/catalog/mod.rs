//! Catalog - the static model registry
//!
//! The catalog is built once at startup and never mutated afterwards, so it
//! is shared by `Arc` and read concurrently without locking.
//!
//! # Module Structure
//!
//! - `types`: Descriptor, plan, capability and pricing types
//! - `defaults`: The built-in model set and plan access table

mod defaults;
mod types;

#[cfg(test)]
mod tests;

pub use defaults::{
    CLAUDE_SONNET_4, DEEPSEEK_CHAT, DEEPSEEK_REASONER, GEMINI_25_FLASH, GEMINI_25_PRO,
};
pub use types::{
    CapabilityLevel, Capabilities, ModelDescriptor, Multimodality, Plan, Pricing, ProviderKind,
    TieredPricing, DEFAULT_TIER_THRESHOLD,
};

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Immutable, queryable set of model descriptors plus plan access
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<Arc<ModelDescriptor>>,
    index: HashMap<String, usize>,
    plan_access: BTreeMap<Plan, Vec<String>>,
}

impl ModelCatalog {
    /// Build and validate a catalog
    ///
    /// # Errors
    /// Returns [`Error::InvalidCatalog`] when ids collide, a plan references an
    /// unknown model, plan sets are not strictly nested, or a premium model is
    /// reachable below the top plan.
    pub fn new(
        models: Vec<ModelDescriptor>,
        plan_access: HashMap<Plan, Vec<String>>,
    ) -> Result<Self> {
        let catalog = Self::assemble(models, plan_access.into_iter().collect());
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in catalog
    #[must_use]
    pub fn builtin() -> Self {
        Self::assemble(defaults::builtin_models(), defaults::builtin_plan_access())
    }

    fn assemble(models: Vec<ModelDescriptor>, plan_access: BTreeMap<Plan, Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(models.len());
        let mut stored = Vec::with_capacity(models.len());
        for model in models {
            // First occurrence wins in the index; validate() reports the duplicate.
            index.entry(model.id.clone()).or_insert(stored.len());
            stored.push(Arc::new(model));
        }
        Self {
            models: stored,
            index,
            plan_access,
        }
    }

    /// Check the catalog invariants
    ///
    /// # Errors
    /// Returns [`Error::InvalidCatalog`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.index.len() != self.models.len() {
            let mut seen = BTreeSet::new();
            for model in &self.models {
                if !seen.insert(model.id.as_str()) {
                    return Err(Error::InvalidCatalog(format!(
                        "duplicate model id: {}",
                        model.id
                    )));
                }
            }
        }

        let mut previous: Option<(Plan, BTreeSet<&str>)> = None;
        for plan in Plan::ALL {
            let ids = self.plan_access.get(&plan).ok_or_else(|| {
                Error::InvalidCatalog(format!("no model list for plan {plan}"))
            })?;

            let mut set = BTreeSet::new();
            for id in ids {
                let model = self.get(id).ok_or_else(|| {
                    Error::InvalidCatalog(format!("plan {plan} references unknown model {id}"))
                })?;
                if model.premium && plan != Plan::Top {
                    return Err(Error::InvalidCatalog(format!(
                        "premium model {id} is reachable from plan {plan}"
                    )));
                }
                set.insert(id.as_str());
            }

            if let Some((lower, lower_set)) = &previous {
                if !lower_set.is_subset(&set) || lower_set.len() == set.len() {
                    return Err(Error::InvalidCatalog(format!(
                        "models of plan {lower} must be a strict subset of plan {plan}"
                    )));
                }
            }
            previous = Some((plan, set));
        }

        Ok(())
    }

    /// Look up a model by id
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the id is unknown.
    pub fn lookup(&self, id: &str) -> Result<Arc<ModelDescriptor>> {
        self.get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Get a model by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<ModelDescriptor>> {
        self.index.get(id).and_then(|&idx| self.models.get(idx))
    }

    /// Check if a model id is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Models a plan may use, in plan-table order
    #[must_use]
    pub fn allowed_models(&self, plan: Plan) -> Vec<Arc<ModelDescriptor>> {
        self.plan_access
            .get(&plan)
            .map(|ids| ids.iter().filter_map(|id| self.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    /// Whether a plan may use a model
    #[must_use]
    pub fn is_allowed(&self, plan: Plan, id: &str) -> bool {
        self.plan_access
            .get(&plan)
            .is_some_and(|ids| ids.iter().any(|allowed| allowed == id))
    }

    /// Lowest plan that may use a model
    #[must_use]
    pub fn minimum_plan(&self, id: &str) -> Option<Plan> {
        Plan::ALL.into_iter().find(|plan| self.is_allowed(*plan, id))
    }

    /// All models, in registration order
    #[must_use]
    pub fn models(&self) -> &[Arc<ModelDescriptor>] {
        &self.models
    }

    /// Distinct providers referenced by the catalog
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderKind> {
        let set: BTreeSet<ProviderKind> = self.models.iter().map(|m| m.provider).collect();
        set.into_iter().collect()
    }

    /// Number of models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog has no models
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
