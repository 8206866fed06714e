//! OpenAI-compatible oracle implementation.
//!
//! Speaks the chat completions protocol, so any endpoint that implements it
//! (the hosted API or a local stand-in) can serve as the oracle.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Conversation, OracleConfig, Turn};
use crate::domain::ports::Oracle;

/// Request to the chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    /// Full turn history; the endpoint is stateless.
    pub messages: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Assistant message inside a response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: crate::domain::models::Role,
    #[serde(default)]
    pub content: String,
}

/// One choice in a chat completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Response from the chat completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Oracle backed by an OpenAI-compatible HTTP endpoint.
pub struct OpenAiOracle {
    config: OracleConfig,
    client: Client,
}

impl OpenAiOracle {
    /// Create the oracle with a timeout-bounded HTTP client.
    pub fn new(config: OracleConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::OracleUnavailable(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Bearer token from config, or the `OPENAI_API_KEY` environment.
    fn api_key(&self) -> Option<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, conversation: &Conversation) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: conversation.turns().to_vec(),
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai_chat"
    }

    async fn converse(&self, conversation: &mut Conversation) -> DomainResult<String> {
        let api_key = self.api_key().ok_or_else(|| {
            DomainError::OracleUnavailable("OPENAI_API_KEY not set".to_string())
        })?;

        let request = self.build_request(conversation);
        debug!(
            model = %request.model,
            turns = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::OracleUnavailable(format!(
                "API error {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(DomainError::EmptyReply)?
            .message
            .content;

        conversation.push_assistant(reply.clone());
        Ok(reply)
    }
}
