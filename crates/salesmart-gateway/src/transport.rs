//! HTTP transport for OpenAI-compatible chat-completions endpoints.
//!
//! One POST per call, no retries, no streaming. Dropping the returned future
//! (e.g. when the caller's UI flow is cancelled) aborts the in-flight
//! request, so no separate cancellation handle is needed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use salesmart_core::config::GatewayConfig;
use salesmart_core::error::GatewayError;
use salesmart_core::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.7;

/// Reply returned when a 2xx response carries no usable content. Soft
/// degradation: the caller shows this instead of an error bubble.
pub const UNPROCESSABLE_REPLY: &str = "抱歉，无法处理该请求。";

// ─────────────────────────────────────────────
// ChatTransport trait
// ─────────────────────────────────────────────

/// The exchange the services build on: a message sequence in, the first
/// choice's content out.
///
/// Implemented by [`HttpTransport`] for real endpoints and by mocks in
/// service tests.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Execute one chat-completions exchange.
    ///
    /// `format` is a hint; transports for providers without JSON mode may
    /// ignore it (the analysis parser copes either way).
    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: Option<ResponseFormat>,
    ) -> Result<String, GatewayError>;
}

// ─────────────────────────────────────────────
// HttpTransport
// ─────────────────────────────────────────────

/// reqwest-backed transport. The config is immutable after construction and
/// the inner client is connection-pooled, so one instance serves any number
/// of concurrent calls.
pub struct HttpTransport {
    client: reqwest::Client,
    config: GatewayConfig,
    /// Whether the provider honors `response_format`. When off, the hint is
    /// dropped and callers rely on the brace-matching fallback parser.
    json_mode: bool,
}

impl std::fmt::Debug for HttpTransport {
    // Token deliberately omitted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_base", &self.config.api_base)
            .field("model", &self.config.model)
            .field("json_mode", &self.json_mode)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport from a resolved config. JSON mode defaults to on.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(HttpTransport {
            client,
            config,
            json_mode: true,
        })
    }

    /// Toggle the JSON-mode capability flag.
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// The format actually sent, after applying the capability flag.
    fn effective_format(&self, requested: Option<ResponseFormat>) -> Option<ResponseFormat> {
        if self.json_mode {
            requested
        } else {
            None
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: Option<ResponseFormat>,
    ) -> Result<String, GatewayError> {
        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            temperature: TEMPERATURE,
            response_format: self.effective_format(format),
        };

        debug!(
            model = %request_body.model,
            messages = messages.len(),
            json_mode = request_body.response_format.is_some(),
            "calling LLM"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.auth_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                GatewayError::Connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %body, "LLM API error");
            return Err(GatewayError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .into_content()
            .unwrap_or_else(|| UNPROCESSABLE_REPLY.to_string()))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
