use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::types::{ChatRequest, ChatResponse, ErrorEnvelope};
use crate::{ChatError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

// ─── ChatClient ───────────────────────────────────────────────────────────

/// Blocking chat-completions client bound to one API key and base URL.
///
/// Every call is a single HTTP round trip. Failures are returned, never
/// retried.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    api_key: String,
    api_base: String,
}

impl ChatClient {
    /// Client for the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ChatClientBuilder {
        ChatClientBuilder {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Send `request` and decode the full response.
    pub fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            endpoint = %self.endpoint(),
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;
        let status = response.status();
        let body = response.text()?;

        check_status(status, &body)?;

        serde_json::from_str(&body).map_err(|source| ChatError::Parse { body, source })
    }

    /// Send `request` and return the text of the first choice.
    pub fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self.send(request)?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }
        response
            .first_text()
            .map(str::to_owned)
            .ok_or(ChatError::EmptyResponse)
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ChatClientBuilder {
    api_key: String,
    api_base: String,
    timeout: Duration,
}

impl ChatClientBuilder {
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ChatClient> {
        if self.api_key.trim().is_empty() {
            return Err(ChatError::Config("API key is empty".into()));
        }
        if self.api_base.trim().is_empty() {
            return Err(ChatError::Config("API base URL is empty".into()));
        }
        let http = Client::builder().timeout(self.timeout).build()?;
        Ok(ChatClient {
            http,
            api_key: self.api_key,
            api_base: self.api_base,
        })
    }
}

// ─── Internal ─────────────────────────────────────────────────────────────

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = provider_message(body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ChatError::Auth {
            status: status.as_u16(),
            message,
        });
    }
    Err(ChatError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Prefer the provider's `error.message`; fall back to the raw body.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ChatClient::builder("k")
            .api_base("http://localhost:9999/v1/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn empty_key_is_config_error() {
        let err = ChatClient::new("  ").unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn provider_message_prefers_error_envelope() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(provider_message(body), "Incorrect API key provided");
        assert_eq!(provider_message("  gateway timeout \n"), "gateway timeout");
    }

    #[test]
    fn forbidden_maps_to_auth() {
        let err = check_status(StatusCode::FORBIDDEN, "nope").unwrap_err();
        assert!(matches!(err, ChatError::Auth { status: 403, .. }));
        let err = check_status(StatusCode::BAD_GATEWAY, "down").unwrap_err();
        assert!(matches!(err, ChatError::Status { status: 502, .. }));
    }
}
