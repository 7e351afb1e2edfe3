//! Gemini provider implementation

use super::config::GeminiConfig;
use super::convert::{convert_request, convert_usage, extract_text};
use super::types::{GeminiError, GeminiRequest, GeminiResponse};
use crate::catalog::ProviderKind;
use crate::completion::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use crate::providers::ChatProvider;
use crate::util::bound_error_message;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    pub(crate) config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn send_request(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        );

        // SECURITY: key travels in a header, never in the logged URL
        debug!("Sending request to Gemini model: {}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(&e, timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(&e, timeout_ms))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Map a non-2xx reply, preferring the message from Gemini's error envelope
///
/// The envelope message is kept verbatim; only a raw body is bounded.
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<GeminiError>(body) {
        Ok(GeminiError { error }) => {
            warn!(
                status,
                error_status = error.status.as_deref().unwrap_or("-"),
                "Gemini API error"
            );
            error.message
        }
        Err(_) => bound_error_message(body),
    };
    Error::ProviderApi {
        provider: ProviderKind::Google,
        status,
        message,
    }
}

#[async_trait::async_trait]
impl ChatProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = convert_request(&request);
        let response = self.send_request(&request.model, &body).await?;

        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());

        let Some(content) = extract_text(&response) else {
            if finish_reason.as_deref() == Some("MAX_TOKENS") {
                warn!("Gemini response empty (MAX_TOKENS)");
            }
            return Err(Error::EmptyResponse {
                provider: ProviderKind::Google,
            });
        };

        Ok(ChatResponse {
            message: content,
            usage: convert_usage(response.usage_metadata.as_ref()),
            model: response.model_version.unwrap_or(request.model),
            finish_reason,
        })
    }
}
