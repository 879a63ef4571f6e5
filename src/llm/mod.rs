//! Language-Model Client
//!
//! A unified interface for chat-completion generation. The rest of the
//! application works against the [`ChatClient`] trait; the OpenRouter
//! implementation is the production backend.
//!
//! # Module Structure
//!
//! - [`client`](crate::llm::client) - The [`ChatClient`] trait and message types
//! - [`openrouter`](crate::llm::openrouter) - OpenRouter HTTP implementation
//!
//! # Example
//!
//! ```ignore
//! use astra::llm::{ChatMessage, ChatClient, OpenRouterClient, OpenRouterConfig};
//!
//! let client = OpenRouterClient::new(OpenRouterConfig::default())?;
//! let answer = client
//!     .chat(&[ChatMessage::user("What is 2+2?")], None, 0.2)
//!     .await?;
//! ```

/// Core chat-completion trait and message types.
pub mod client;
/// OpenRouter chat-completion backend.
pub mod openrouter;

pub use client::{ChatClient, ChatMessage, ChatRole};
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
