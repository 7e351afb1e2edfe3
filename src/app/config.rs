//! Application configuration types

use agora_llm::completion::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use agora_llm::RoutingRules;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub routing: RoutingRules,
}

/// LLM call settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Overall deadline for one dispatched call
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    /// HTTP client timeout applied to every adapter
    #[serde(default)]
    pub client_timeout_secs: Option<u64>,
    #[serde(default)]
    pub deepseek_base_url: Option<String>,
    #[serde(default)]
    pub anthropic_base_url: Option<String>,
    #[serde(default)]
    pub gemini_base_url: Option<String>,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_call_timeout_secs() -> u64 {
    180
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            call_timeout_secs: default_call_timeout_secs(),
            client_timeout_secs: None,
            deepseek_base_url: None,
            anthropic_base_url: None,
            gemini_base_url: None,
        }
    }
}

impl LlmConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn client_timeout(&self) -> Option<Duration> {
        self.client_timeout_secs.map(Duration::from_secs)
    }
}
