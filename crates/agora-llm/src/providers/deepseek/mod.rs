//! DeepSeek - economy LLM provider
//!
//! Backs both economy tiers of the catalog (`deepseek-chat` and
//! `deepseek-reasoner`). Uses the OpenAI-compatible chat completions API.

use super::ChatProvider;
use crate::catalog::ProviderKind;
use crate::completion::{ChatRequest, ChatResponse, TokenUsage};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::util::{bound_error_message, env_non_empty, mask_api_key};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// DeepSeek API base URL
pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";

/// Default request timeout; reasoner calls can be slow
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// DeepSeek provider configuration
#[derive(Clone)]
pub struct DeepSeekConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeepSeekConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEEPSEEK_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads `DEEPSEEK_API_KEY` and the optional `DEEPSEEK_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env_non_empty("DEEPSEEK_API_KEY")
            .ok_or_else(|| Error::NotConfigured("DEEPSEEK_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = env_non_empty("DEEPSEEK_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// DeepSeek provider (OpenAI-compatible)
pub struct DeepSeekProvider {
    client: Client,
    config: DeepSeekConfig,
}

// OpenAI-compatible request/response types
#[derive(Debug, Serialize)]
struct CompletionBody {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
    #[serde(default)]
    prompt_cache_hit_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl DeepSeekProvider {
    /// Create a new DeepSeek provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: DeepSeekConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = DeepSeekConfig::from_env()?;
        Self::new(config)
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &DeepSeekConfig {
        &self.config
    }

    fn build_body(request: &ChatRequest) -> CompletionBody {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system() {
            messages.push(WireMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        messages.extend(request.messages.iter().map(Self::convert_message));

        CompletionBody {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn convert_message(msg: &Message) -> WireMessage {
        WireMessage {
            role: msg.role.as_str(),
            content: msg.content.clone(),
        }
    }

    fn api_error(status: u16, body: &str) -> Error {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| bound_error_message(body));
        Error::ProviderApi {
            provider: ProviderKind::DeepSeek,
            status,
            message,
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for DeepSeekProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    fn name(&self) -> &str {
        "deepseek"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = Self::build_body(&request);
        let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);

        debug!("Sending request to DeepSeek");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(&e, timeout_ms))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(&e, timeout_ms))?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &text));
        }

        let reply: CompletionReply =
            serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let choice = reply.choices.into_iter().next().ok_or(Error::EmptyResponse {
            provider: ProviderKind::DeepSeek,
        })?;

        let content = choice
            .message
            .content
            .filter(|c| !c.is_empty())
            .ok_or(Error::EmptyResponse {
                provider: ProviderKind::DeepSeek,
            })?;

        let usage = reply
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
                cached_tokens: u.prompt_cache_hit_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            message: content,
            usage,
            model: reply.model.unwrap_or(request.model),
            finish_reason: choice.finish_reason,
        })
    }
}
