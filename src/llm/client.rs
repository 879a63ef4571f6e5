//! Chat-completion client abstraction
//!
//! The assembly layer depends only on the narrow [`ChatClient`] contract:
//! role-tagged messages in, generated text out. The sole production
//! implementation is [`OpenRouterClient`](crate::llm::OpenRouterClient);
//! tests substitute hand-written stubs.

use crate::types::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message role for chat-completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Generic chat-completion trait for provider abstraction.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a completion for the given conversation. `model`
    /// overrides the configured default when given; `temperature` is
    /// forwarded verbatim.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
        temperature: f32,
    ) -> Result<String>;

    /// Default model identifier this client generates with.
    fn model_name(&self) -> &str;
}
