//! Request analysis
//!
//! Scores a request for complexity and detects whether it refers to
//! non-text media. The score is additive and only clamped at the end, so a
//! keyword-dense message saturates at 100 instead of overflowing.

use super::rules::{
    RoutingRules, CHARS_PER_POINT, CHARS_PER_TOKEN, CODING_WEIGHT, HISTORY_CAP, HISTORY_WEIGHT,
    KEYWORD_WEIGHT, MAX_COMPLEXITY, MULTI_QUESTION_WEIGHT,
};
use super::types::{RoutingAnalysis, RoutingRequest};

/// Analyze a request against a rule set
#[must_use]
pub fn analyze(request: &RoutingRequest, rules: &RoutingRules) -> RoutingAnalysis {
    let lowered = request.message.to_lowercase();
    let message_length = request.message.chars().count();
    let history_length = request.conversation_history.len();

    let keyword_hits = rules
        .complex_keywords
        .iter()
        .filter(|kw| contains_keyword(&lowered, kw))
        .count();

    let mut score = to_u32(keyword_hits).saturating_mul(KEYWORD_WEIGHT);
    score = score.saturating_add(to_u32(message_length / CHARS_PER_POINT));
    score = score.saturating_add(
        to_u32(history_length)
            .saturating_mul(HISTORY_WEIGHT)
            .min(HISTORY_CAP),
    );
    if request.message.matches('?').count() > 1 {
        score = score.saturating_add(MULTI_QUESTION_WEIGHT);
    }
    if rules
        .coding_keywords
        .iter()
        .any(|kw| contains_keyword(&lowered, kw))
    {
        score = score.saturating_add(CODING_WEIGHT);
    }

    let needs_multimodal = rules
        .multimodal_keywords
        .iter()
        .any(|kw| contains_keyword(&lowered, kw));

    let history_chars: usize = request
        .conversation_history
        .iter()
        .map(|m| m.char_len())
        .sum();

    RoutingAnalysis {
        // MAX_COMPLEXITY fits in u8
        complexity_score: u8::try_from(score.min(MAX_COMPLEXITY)).unwrap_or(u8::MAX),
        needs_multimodal,
        context_length: history_chars / CHARS_PER_TOKEN,
        plan: request.plan,
        agent_type: request.agent_type.clone(),
        message_length,
        history_length,
    }
}

fn contains_keyword(lowered: &str, keyword: &str) -> bool {
    !keyword.is_empty() && lowered.contains(keyword.to_lowercase().as_str())
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
