//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Question answering handler.
pub mod ask;
/// Health check handler.
pub mod health;
