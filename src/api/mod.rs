//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for ASTRA, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Ask (`/api/ask`)
//! - `POST /api/ask` - Answer a question with numbered references
//!
//! ## Health (`/health`)
//! - `GET /health` - Health check endpoint
//!
//! # Degraded Responses
//!
//! `/api/ask` still returns `200 OK` when upstream sources or the language
//! model are unavailable; such responses carry a `warning` field and a
//! deterministic fallback answer. Only an empty `question` is rejected,
//! with `400 Bad Request`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::create_router;
