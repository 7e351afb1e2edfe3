//! Conversion between the neutral chat types and Gemini wire types

use super::config::SYSTEM_ACKNOWLEDGEMENT;
use super::types::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig, UsageMetadata};
use crate::completion::{ChatRequest, TokenUsage};
use crate::message::MessageRole;

const USER_ROLE: &str = "user";
const MODEL_ROLE: &str = "model";

/// Build the generateContent body
pub(crate) fn convert_request(request: &ChatRequest) -> GeminiRequest {
    let mut contents = Vec::with_capacity(request.messages.len() + 2);

    if let Some(system) = request.system() {
        contents.push(GeminiContent::text(USER_ROLE, system));
        contents.push(GeminiContent::text(MODEL_ROLE, SYSTEM_ACKNOWLEDGEMENT));
    }

    contents.extend(request.messages.iter().map(|msg| {
        let role = match msg.role {
            MessageRole::User => USER_ROLE,
            MessageRole::Assistant => MODEL_ROLE,
        };
        GeminiContent::text(role, msg.content.clone())
    }));

    GeminiRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
        },
    }
}

/// Text of the first candidate, parts concatenated
pub(crate) fn extract_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    (!text.is_empty()).then_some(text)
}

pub(crate) fn convert_usage(usage: Option<&UsageMetadata>) -> TokenUsage {
    let Some(u) = usage else {
        return TokenUsage::default();
    };
    let completion_tokens = u.candidates_token_count.unwrap_or(0);
    TokenUsage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens,
        total_tokens: if u.total_token_count > 0 {
            u.total_token_count
        } else {
            u.prompt_token_count.saturating_add(completion_tokens)
        },
        cached_tokens: u.cached_content_token_count,
    }
}
