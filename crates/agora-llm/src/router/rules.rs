//! Routing rules for model selection
//!
//! Vocabularies and thresholds are data so deployments can tune them from
//! configuration; the defaults reproduce the production heuristic exactly.

use crate::catalog::{
    CLAUDE_SONNET_4, DEEPSEEK_CHAT, DEEPSEEK_REASONER, GEMINI_25_PRO,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Points per complex-reasoning keyword hit
pub(crate) const KEYWORD_WEIGHT: u32 = 20;
/// Characters of message per complexity point
pub(crate) const CHARS_PER_POINT: usize = 50;
/// Points per prior turn
pub(crate) const HISTORY_WEIGHT: u32 = 2;
/// Cap on history points
pub(crate) const HISTORY_CAP: u32 = 20;
/// Points when the message asks more than one question
pub(crate) const MULTI_QUESTION_WEIGHT: u32 = 15;
/// Points when the message is about code
pub(crate) const CODING_WEIGHT: u32 = 25;
/// Upper bound of the complexity score
pub(crate) const MAX_COMPLEXITY: u32 = 100;
/// Characters per estimated token
pub(crate) const CHARS_PER_TOKEN: usize = 4;

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_complex_keywords() -> Vec<String> {
    words(&[
        "analizar",
        "comparar",
        "evaluar",
        "diseñar",
        "arquitectura",
        "optimizar",
        "refactorizar",
        "debuggear",
        "depurar",
        "investigar",
        "estrategia",
        "planificar",
        "paso a paso",
    ])
}

fn default_coding_keywords() -> Vec<String> {
    words(&["código", "función", "algoritmo", "api"])
}

fn default_multimodal_keywords() -> Vec<String> {
    words(&["imagen", "video", "audio", "documento", "foto", "pdf"])
}

fn default_high_stakes_agents() -> Vec<String> {
    words(&["legal", "financiero", "medico", "médico"])
}

fn default_entry_reasoner_threshold() -> u8 {
    70
}

fn default_premium_threshold() -> u8 {
    80
}

fn default_mid_threshold() -> u8 {
    50
}

/// Catalog ids selected by each branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTargets {
    /// Base economy model
    pub economy: String,
    /// Reasoning-tier economy model used by the entry plan
    pub entry_reasoner: String,
    /// Native-multimodal premium model
    pub multimodal: String,
    /// Premium high-reasoning model
    pub premium_reasoning: String,
    /// Mid-tier reasoning economy model
    pub mid_reasoning: String,
}

impl Default for RouteTargets {
    fn default() -> Self {
        Self {
            economy: DEEPSEEK_CHAT.to_string(),
            entry_reasoner: DEEPSEEK_REASONER.to_string(),
            multimodal: GEMINI_25_PRO.to_string(),
            premium_reasoning: CLAUDE_SONNET_4.to_string(),
            mid_reasoning: DEEPSEEK_REASONER.to_string(),
        }
    }
}

/// Model routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRules {
    /// Keywords signalling multi-step reasoning (20 points each)
    #[serde(default = "default_complex_keywords")]
    pub complex_keywords: Vec<String>,
    /// Keywords signalling a coding request (25 points once)
    #[serde(default = "default_coding_keywords")]
    pub coding_keywords: Vec<String>,
    /// Keywords signalling image/audio/video/document content
    #[serde(default = "default_multimodal_keywords")]
    pub multimodal_keywords: Vec<String>,
    /// Agent categories that always get the premium reasoning model
    #[serde(default = "default_high_stakes_agents")]
    pub high_stakes_agents: Vec<String>,
    /// Entry plan switches to the reasoner above this score
    #[serde(default = "default_entry_reasoner_threshold")]
    pub entry_reasoner_threshold: u8,
    /// Premium reasoning above this score
    #[serde(default = "default_premium_threshold")]
    pub premium_threshold: u8,
    /// Mid reasoning above this score
    #[serde(default = "default_mid_threshold")]
    pub mid_threshold: u8,
    /// Branch targets
    #[serde(default)]
    pub targets: RouteTargets,
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self {
            complex_keywords: default_complex_keywords(),
            coding_keywords: default_coding_keywords(),
            multimodal_keywords: default_multimodal_keywords(),
            high_stakes_agents: default_high_stakes_agents(),
            entry_reasoner_threshold: default_entry_reasoner_threshold(),
            premium_threshold: default_premium_threshold(),
            mid_threshold: default_mid_threshold(),
            targets: RouteTargets::default(),
        }
    }
}

impl RoutingRules {
    /// Whether an agent category is in the high-stakes set
    ///
    /// Membership ignores case only; surrounding whitespace is not stripped.
    #[must_use]
    pub fn is_high_stakes(&self, agent_type: &str) -> bool {
        let agent_type = agent_type.to_lowercase();
        self.high_stakes_agents
            .iter()
            .any(|a| a.to_lowercase() == agent_type)
    }

    /// Keywords lowercased once, so matching against a lowercased message is exact
    pub(crate) fn normalized(mut self) -> Self {
        for list in [
            &mut self.complex_keywords,
            &mut self.coding_keywords,
            &mut self.multimodal_keywords,
        ] {
            let mut seen = HashSet::new();
            list.retain_mut(|word| {
                *word = word.to_lowercase();
                !word.is_empty() && seen.insert(word.clone())
            });
        }
        self
    }
}
