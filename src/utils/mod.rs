//! Shared utilities.
//!
//! # Module Structure
//!
//! - `config`: environment-driven application configuration
//! - `text`: small text helpers used by adapters and the assembler

/// Environment-driven application configuration
pub mod config;
/// Text truncation and whitespace helpers
pub mod text;

pub use config::{Config, RetrievalConfig, ServerConfig};
