use super::types::{
    AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicUsage, ResponseContentBlock,
};
use crate::completion::{ChatRequest, TokenUsage};

/// Build the Messages API body; the system prompt goes in the top-level field
pub(crate) fn convert_request(request: &ChatRequest) -> AnthropicRequest {
    let messages = request
        .messages
        .iter()
        .map(|msg| AnthropicMessage {
            role: msg.role.as_str(),
            content: msg.content.clone(),
        })
        .collect();

    AnthropicRequest {
        model: request.model.clone(),
        max_tokens: request.max_tokens,
        system: request.system().map(str::to_string),
        messages,
        temperature: request.temperature,
    }
}

/// Concatenate every text block of a reply
pub(crate) fn extract_text(response: &AnthropicResponse) -> String {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ResponseContentBlock::Text { text } => Some(text.as_str()),
            ResponseContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Normalize usage; cache reads and writes count toward the prompt
pub(crate) fn convert_usage(usage: &AnthropicUsage) -> TokenUsage {
    let cache_write = usage.cache_creation_input_tokens.unwrap_or(0);
    let cache_read = usage.cache_read_input_tokens.unwrap_or(0);
    let prompt_tokens = usage
        .input_tokens
        .saturating_add(cache_write)
        .saturating_add(cache_read);

    TokenUsage {
        prompt_tokens,
        completion_tokens: usage.output_tokens,
        total_tokens: prompt_tokens.saturating_add(usage.output_tokens),
        cached_tokens: usage.cache_read_input_tokens,
    }
}
