//! Completion backend: the trait the orchestrator talks to and an
//! OpenAI-compatible HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use receptionist_core::config::LlmConfig;

use crate::error::LlmError;
use crate::types::Turn;

/// Anything that can turn an ordered message list into one reply.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, model: &str, messages: &[Turn]) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.into().trim().to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build a client from settings. `None` when no usable key is set.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let key = config.usable_api_key()?;
        Some(Self::new(
            key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmBackend for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[Turn]) -> Result<String, LlmError> {
        let body = CompletionRequest { model, messages };

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CompletionResponse = res.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("no choices in response".to_string()))
    }
}
