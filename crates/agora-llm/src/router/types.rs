//! Core types for request routing

use crate::catalog::{ModelDescriptor, Plan};
use crate::message::Message;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Input to the routing decision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRequest {
    /// The new user turn
    pub message: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<Message>,
    /// Caller's plan; `None` when the plan name was not recognised
    #[serde(default, deserialize_with = "deserialize_plan_name")]
    pub plan: Option<Plan>,
    /// Agent category tag (e.g. "legal", "financiero")
    #[serde(default)]
    pub agent_type: String,
    /// Explicit model id that bypasses analysis
    #[serde(default)]
    pub force_model: Option<String>,
}

impl RoutingRequest {
    /// Create a request for a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the plan
    #[must_use]
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Set the plan from the name the billing layer uses
    #[must_use]
    pub fn with_plan_name(mut self, name: &str) -> Self {
        self.plan = Plan::from_name(name);
        self
    }

    /// Set the conversation history
    #[must_use]
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.conversation_history = history;
        self
    }

    /// Set the agent type
    #[must_use]
    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    /// Force a specific model
    #[must_use]
    pub fn with_force_model(mut self, model_id: impl Into<String>) -> Self {
        self.force_model = Some(model_id.into());
        self
    }
}

/// Read a plan the way the billing layer names it; anything unrecognised is `None`
fn deserialize_plan_name<'de, D>(deserializer: D) -> std::result::Result<Option<Plan>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(Plan::from_name))
}

/// Derived view of a request used by the selection rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingAnalysis {
    /// Heuristic complexity, 0..=100
    pub complexity_score: u8,
    /// Message mentions non-text media
    pub needs_multimodal: bool,
    /// Estimated history size in tokens (chars / 4)
    pub context_length: usize,
    /// Caller's plan
    pub plan: Option<Plan>,
    /// Agent category tag
    pub agent_type: String,
    /// Message length in characters
    pub message_length: usize,
    /// Number of prior turns
    pub history_length: usize,
}

/// Which selection branch produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteReason {
    /// Caller forced the model
    Forced,
    /// Entry plan, complex request
    EntryReasoner,
    /// Entry plan, simple request
    EntryEconomy,
    /// Top plan asking about media
    Multimodal,
    /// Very complex request or high-stakes agent
    PremiumReasoning,
    /// Moderately complex request
    MidReasoning,
    /// Nothing else matched
    Default,
}

impl RouteReason {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forced => "forced",
            Self::EntryReasoner => "entry_reasoner",
            Self::EntryEconomy => "entry_economy",
            Self::Multimodal => "multimodal",
            Self::PremiumReasoning => "premium_reasoning",
            Self::MidReasoning => "mid_reasoning",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for RouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of routing a request
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Selected model
    pub model: Arc<ModelDescriptor>,
    /// Branch that selected it
    pub reason: RouteReason,
    /// Analysis, absent for forced models
    pub analysis: Option<RoutingAnalysis>,
}
