//! Dispatch - send a chat to the adapter that serves a model
//!
//! The dispatcher is the only place that joins the catalog to the provider
//! adapters: it resolves a descriptor's provider, puts the descriptor's wire
//! model name on the request, and times the call. Adapter errors pass through
//! unchanged.

use crate::catalog::ModelDescriptor;
use crate::completion::{ChatRequest, TokenUsage, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::providers::{ChatProvider, ProviderRegistry};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Outcome of a dispatched call
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// Generated text
    pub message: String,
    /// Token usage reported by the provider
    pub usage: TokenUsage,
    /// Catalog id of the model that answered
    pub model: String,
    /// Wall-clock time of the provider call in milliseconds
    pub duration_ms: u64,
    /// Finish reason reported by the provider
    pub finish_reason: Option<String>,
    /// Descriptor of the model that answered
    #[serde(serialize_with = "serialize_descriptor")]
    pub model_config: Arc<ModelDescriptor>,
}

fn serialize_descriptor<S: Serializer>(
    descriptor: &Arc<ModelDescriptor>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    descriptor.as_ref().serialize(serializer)
}

/// Routes chat calls to provider adapters
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over a provider registry
    #[must_use]
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// The provider registry
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Call a model with a conversation
    ///
    /// `max_tokens` and `temperature` fall back to 4000 and 0.7.
    ///
    /// # Errors
    /// Returns [`Error::UnknownProvider`] if no adapter serves the model, or
    /// the adapter's error.
    pub async fn call_model(
        &self,
        model: &Arc<ModelDescriptor>,
        messages: Vec<Message>,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<DispatchResult> {
        let mut request = ChatRequest::new(model.api_model())
            .with_messages(messages)
            .with_max_tokens(max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
            .with_temperature(temperature.unwrap_or(DEFAULT_TEMPERATURE));
        if let Some(prompt) = system_prompt {
            request = request.with_system_prompt(prompt);
        }
        self.call(model, request).await
    }

    /// Call a model with a prepared request
    ///
    /// The request's `model` is replaced by the descriptor's wire name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownProvider`] if no adapter serves the model, or
    /// the adapter's error.
    #[instrument(skip(self, model, request), fields(model = %model.id, provider = %model.provider))]
    pub async fn call(
        &self,
        model: &Arc<ModelDescriptor>,
        mut request: ChatRequest,
    ) -> Result<DispatchResult> {
        let provider = self.resolve(model)?;
        request.model = model.api_model().to_string();

        debug!(
            provider = provider.name(),
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Dispatching chat"
        );

        let started = Instant::now();
        let response = provider.chat(request).await?;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            duration_ms,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Chat completed"
        );

        Ok(DispatchResult {
            message: response.message,
            usage: response.usage,
            model: model.id.clone(),
            duration_ms,
            finish_reason: response.finish_reason,
            model_config: Arc::clone(model),
        })
    }

    /// Call a model, abandoning the request when `cancel` fires
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] if the token fires first; otherwise as
    /// [`Dispatcher::call`].
    pub async fn call_with_cancel(
        &self,
        model: &Arc<ModelDescriptor>,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<DispatchResult> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!(model = %model.id, "Chat cancelled");
                Err(Error::Cancelled)
            }
            result = self.call(model, request) => result,
        }
    }

    /// Call a model with an overall deadline
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] if the deadline passes first; otherwise as
    /// [`Dispatcher::call`].
    pub async fn call_with_timeout(
        &self,
        model: &Arc<ModelDescriptor>,
        request: ChatRequest,
        timeout: Duration,
    ) -> Result<DispatchResult> {
        match tokio::time::timeout(timeout, self.call(model, request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    fn resolve(&self, model: &ModelDescriptor) -> Result<Arc<dyn ChatProvider>> {
        self.registry
            .get(model.provider)
            .ok_or(Error::UnknownProvider(model.provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ModelCatalog, ProviderKind, CLAUDE_SONNET_4, DEEPSEEK_CHAT, GEMINI_25_PRO,
    };
    use crate::completion::ChatResponse;
    use crate::providers::MockChatProvider;
    use mockall::predicate::function;

    fn model(id: &str) -> Arc<ModelDescriptor> {
        ModelCatalog::builtin().lookup(id).unwrap()
    }

    fn reply(text: &str) -> ChatResponse {
        ChatResponse {
            message: text.to_string(),
            usage: TokenUsage::new(12, 4),
            model: "provider-model".to_string(),
            finish_reason: Some("stop".to_string()),
        }
    }

    fn dispatcher_with(provider: MockChatProvider) -> Dispatcher {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(provider));
        Dispatcher::new(registry)
    }

    fn mock(kind: ProviderKind) -> MockChatProvider {
        let mut provider = MockChatProvider::new();
        provider.expect_kind().return_const(kind);
        provider
            .expect_name()
            .return_const(kind.as_str().to_string());
        provider
    }

    #[tokio::test]
    async fn test_call_model_sends_api_model() {
        let mut provider = mock(ProviderKind::Anthropic);
        provider
            .expect_chat()
            .with(function(|req: &ChatRequest| {
                req.model == "claude-sonnet-4-20250514"
                    && req.system_prompt.as_deref() == Some("Sos un asistente")
                    && req.max_tokens == DEFAULT_MAX_TOKENS
                    && req.messages.len() == 1
            }))
            .times(1)
            .returning(|_| Ok(reply("hola")));

        let dispatcher = dispatcher_with(provider);
        let claude = model(CLAUDE_SONNET_4);
        let result = dispatcher
            .call_model(
                &claude,
                vec![Message::user("hola")],
                Some("Sos un asistente"),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.message, "hola");
        assert_eq!(result.model, CLAUDE_SONNET_4);
        assert_eq!(result.usage.total_tokens, 16);
        assert_eq!(result.model_config.id, CLAUDE_SONNET_4);
        assert_eq!(result.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_call_overrides_request_model() {
        let mut provider = mock(ProviderKind::DeepSeek);
        provider
            .expect_chat()
            .with(function(|req: &ChatRequest| {
                req.model == DEEPSEEK_CHAT && req.temperature == 0.1
            }))
            .returning(|_| Ok(reply("ok")));

        let dispatcher = dispatcher_with(provider);
        let request = ChatRequest::new("something-else")
            .with_message(Message::user("hola"))
            .with_temperature(0.1);
        let result = dispatcher.call(&model(DEEPSEEK_CHAT), request).await.unwrap();
        assert_eq!(result.message, "ok");
    }

    #[tokio::test]
    async fn test_missing_adapter_is_unknown_provider() {
        let dispatcher = dispatcher_with(mock(ProviderKind::DeepSeek));
        let err = dispatcher
            .call_model(&model(GEMINI_25_PRO), vec![Message::user("hola")], None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownProvider(ProviderKind::Google)));
    }

    #[tokio::test]
    async fn test_adapter_error_passes_through() {
        let mut provider = mock(ProviderKind::DeepSeek);
        provider.expect_chat().returning(|_| {
            Err(Error::ProviderApi {
                provider: ProviderKind::DeepSeek,
                status: 503,
                message: "busy".to_string(),
            })
        });

        let dispatcher = dispatcher_with(provider);
        let err = dispatcher
            .call_model(&model(DEEPSEEK_CHAT), vec![Message::user("hola")], None, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_cancelled_before_call() {
        let mut provider = mock(ProviderKind::DeepSeek);
        provider.expect_chat().never();

        let dispatcher = dispatcher_with(provider);
        let token = CancellationToken::new();
        token.cancel();

        let err = dispatcher
            .call_with_cancel(&model(DEEPSEEK_CHAT), ChatRequest::new("x"), token)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_token_unused_passes_result() {
        let mut provider = mock(ProviderKind::DeepSeek);
        provider.expect_chat().returning(|_| Ok(reply("listo")));

        let dispatcher = dispatcher_with(provider);
        let result = dispatcher
            .call_with_cancel(
                &model(DEEPSEEK_CHAT),
                ChatRequest::new("x"),
                CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(result.message, "listo");
    }

    struct SlowProvider;

    #[async_trait::async_trait]
    impl ChatProvider for SlowProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Google
        }

        fn name(&self) -> &str {
            "slow"
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(reply("tarde"))
        }
    }

    #[tokio::test]
    async fn test_timeout_fires() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(SlowProvider));
        let dispatcher = Dispatcher::new(registry);

        let err = dispatcher
            .call_with_timeout(
                &model(GEMINI_25_PRO),
                ChatRequest::new("x"),
                Duration::from_millis(20),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(20)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_inflight_call() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(SlowProvider));
        let dispatcher = Dispatcher::new(registry);

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = dispatcher
            .call_with_cancel(&model(GEMINI_25_PRO), ChatRequest::new("x"), token)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[test]
    fn test_result_serializes_descriptor() {
        let result = DispatchResult {
            message: "hola".to_string(),
            usage: TokenUsage::new(1, 1),
            model: DEEPSEEK_CHAT.to_string(),
            duration_ms: 42,
            finish_reason: None,
            model_config: model(DEEPSEEK_CHAT),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model_config"]["id"], DEEPSEEK_CHAT);
        assert_eq!(json["duration_ms"], 42);
    }
}
