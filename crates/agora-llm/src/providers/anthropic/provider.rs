use super::convert::{convert_request, convert_usage, extract_text};
use super::types::{
    AnthropicConfig, AnthropicError, AnthropicRequest, AnthropicResponse, API_VERSION,
};
use crate::catalog::ProviderKind;
use crate::completion::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use crate::providers::ChatProvider;
use crate::util::bound_error_message;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Anthropic Claude provider
pub struct AnthropicProvider {
    pub(crate) client: Client,
    pub(crate) config: AnthropicConfig,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = AnthropicConfig::from_env()?;
        Self::new(config)
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Send request to Anthropic API
    async fn send_request(&self, request: AnthropicRequest) -> Result<AnthropicResponse> {
        let url = format!("{}/v1/messages", self.config.base_url);

        debug!("Sending request to Anthropic: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(&e, self.timeout_ms()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(&e, self.timeout_ms()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Map a non-2xx reply, preferring the message from Anthropic's error envelope
///
/// The envelope message is kept verbatim; only a raw body is bounded.
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<AnthropicError>(body) {
        Ok(AnthropicError { error }) => {
            warn!(status, error_type = %error.r#type, "Anthropic API error");
            error.message
        }
        Err(_) => bound_error_message(body),
    };
    Error::ProviderApi {
        provider: ProviderKind::Anthropic,
        status,
        message,
    }
}

#[async_trait::async_trait]
impl ChatProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let response = self.send_request(convert_request(&request)).await?;

        let content = extract_text(&response);
        if content.is_empty() {
            return Err(Error::EmptyResponse {
                provider: ProviderKind::Anthropic,
            });
        }

        Ok(ChatResponse {
            message: content,
            usage: convert_usage(&response.usage),
            model: response.model,
            finish_reason: response.stop_reason,
        })
    }
}
