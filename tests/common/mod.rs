//! Mock implementations shared across integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use astra::llm::{ChatClient, ChatMessage};
use astra::types::{AppError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock chat client with a configurable canned response.
///
/// Every call is captured so tests can assert on the prompts the
/// assembler actually sent.
///
/// # Examples
///
/// ```ignore
/// // A client that returns a fixed answer
/// let client = MockChatClient::new("Bones demineralize in orbit [1].");
///
/// // A client that always fails, forcing the fallback path
/// let client = MockChatClient::failing();
/// ```
pub struct MockChatClient {
    response: String,
    should_fail: bool,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatClient {
    /// Create a mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Message sets from every `chat` call, in call order. Failed calls
    /// are captured too.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _model: Option<&str>,
        _temperature: f32,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
