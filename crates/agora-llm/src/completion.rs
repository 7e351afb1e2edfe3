//! Chat request and response types
//!
//! The provider-neutral shapes every adapter consumes and produces.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Default output token budget for a chat call
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default sampling temperature for a chat call
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
    /// Prompt tokens served from the provider's cache, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_tokens: Option<u32>,
}

impl TokenUsage {
    /// Build usage from prompt/completion counts
    #[must_use]
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
            cached_tokens: None,
        }
    }
}

/// Chat request handed to a provider adapter
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model name as the provider expects it
    pub model: String,
    /// Conversation, oldest first
    pub messages: Vec<Message>,
    /// System instructions, placed by each adapter in its own way
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature
    pub temperature: f32,
}

impl ChatRequest {
    /// Create a new chat request with default budget and temperature
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add messages
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// System prompt, treating an empty string as absent
    pub(crate) fn system(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Normalized provider reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    pub message: String,
    /// Token usage
    pub usage: TokenUsage,
    /// Model reported by the provider
    pub model: String,
    /// Finish reason
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::new("deepseek-chat")
            .with_system_prompt("Sos un abogado")
            .with_message(Message::user("Hola"))
            .with_max_tokens(100)
            .with_temperature(0.2);

        assert_eq!(request.model, "deepseek-chat");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.system(), Some("Sos un abogado"));
    }

    #[test]
    fn test_chat_request_defaults() {
        let request = ChatRequest::new("m").with_system_prompt("   ");
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.system(), None);
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::new(120, 30);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(usage.cached_tokens, None);
    }
}
