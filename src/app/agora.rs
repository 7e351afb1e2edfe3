//! Route-then-dispatch facade

use super::config::LlmConfig;
use agora_llm::{
    ChatRequest, DispatchResult, Dispatcher, Message, ModelRouter, RoutingDecision, RoutingRequest,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A routed and answered chat turn
#[derive(Debug, Clone, Serialize)]
pub struct RoutedChat {
    pub reason: agora_llm::RouteReason,
    pub analysis: Option<agora_llm::RoutingAnalysis>,
    pub result: DispatchResult,
}

/// Router and dispatcher bound together with the call settings
pub struct Agora {
    router: ModelRouter,
    dispatcher: Dispatcher,
    llm: LlmConfig,
}

impl Agora {
    pub fn new(router: ModelRouter, dispatcher: Dispatcher, llm: LlmConfig) -> Self {
        Self {
            router,
            dispatcher,
            llm,
        }
    }

    /// Route a request, then send it to the selected model
    ///
    /// Routing always finishes before any provider is contacted. The call is
    /// abandoned when `cancel` fires or the configured deadline passes.
    pub async fn chat(
        &self,
        request: &RoutingRequest,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        cancel: CancellationToken,
    ) -> agora_llm::Result<RoutedChat> {
        let RoutingDecision {
            model,
            reason,
            analysis,
        } = self.router.decide(request);

        let mut messages = request.conversation_history.clone();
        messages.push(Message::user(request.message.as_str()));

        let mut chat = ChatRequest::new(model.api_model())
            .with_messages(messages)
            .with_max_tokens(max_tokens.unwrap_or(self.llm.max_tokens))
            .with_temperature(temperature.unwrap_or(self.llm.temperature));
        if let Some(prompt) = system_prompt {
            chat = chat.with_system_prompt(prompt);
        }

        debug!(model = %model.id, reason = %reason, "Dispatching routed chat");

        let limit = self.llm.call_timeout();
        let call = self.dispatcher.call_with_cancel(&model, chat, cancel);
        let result = tokio::time::timeout(limit, call).await.map_err(|_| {
            agora_llm::Error::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
        })??;

        Ok(RoutedChat {
            reason,
            analysis,
            result,
        })
    }
}
