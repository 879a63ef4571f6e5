//! OpenRouter chat-completion client
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol against
//! OpenRouter, including the optional `HTTP-Referer` / `X-Title`
//! attribution headers OpenRouter uses for app ranking.

use crate::llm::client::{ChatClient, ChatMessage};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production endpoint for the OpenRouter API.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model used when none is configured or requested.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

const DEFAULT_REFERER: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    /// Bearer key. `None` is allowed so the server can boot without
    /// credentials; calls then fail and assembly degrades to fallback.
    pub api_key: Option<String>,
    pub model: String,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution.
    pub referer: String,
    /// Sent as `X-Title` for OpenRouter app attribution, when set.
    pub title: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: OPENROUTER_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            title: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenRouter-backed [`ChatClient`].
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: reqwest::Client,
}

impl OpenRouterClient {
    /// Build a client with its own connection pool; generation traffic
    /// gets a longer timeout than search traffic.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                AppError::Config(format!("failed to build OpenRouter client: {err}"))
            })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
        temperature: f32,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::LLM("OPENROUTER_API_KEY is not configured".to_string()))?;
        let model = model.unwrap_or(&self.config.model);

        tracing::debug!(
            %model,
            temperature,
            message_count = messages.len(),
            "requesting chat completion"
        );

        let request = ChatCompletionRequest {
            model,
            messages,
            temperature,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .json(&request);
        if let Some(title) = &self.config.title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| AppError::LLM(format!("OpenRouter request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!("OpenRouter error {status}: {body}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AppError::LLM(format!("OpenRouter response decode failed: {err}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// ============= OpenRouter Wire Shapes =============

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
