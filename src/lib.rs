//! # A.S.T.R.A - Aggregated Search with Traceable Reference Assembly
//!
//! A retrieval-augmented question answering server for space biology, built
//! in Rust. ASTRA fans a question out to public reference sources (NASA
//! TechPort, arXiv, PubMed, CrossRef and caller-supplied URLs), merges
//! whatever came back, and synthesizes an answer whose `[n]` citations
//! index into a traceable reference list.
//!
//! ## Overview
//!
//! ASTRA can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `astra-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use astra::{AppState, utils::Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = AppState::from_config(config).await?;
//!
//!     let app = astra::api::create_router().with_state(state);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Searching Without the Server
//!
//! ```rust,ignore
//! use astra::retrieval::{SearchAggregator, http};
//! use astra::types::SourceTag;
//!
//! let client = http::shared_client(10).await?;
//! let aggregator = SearchAggregator::with_default_sources(client.clone(), "DEMO_KEY");
//! let docs = aggregator
//!     .aggregate("bone loss microgravity", &[SourceTag::Pubmed], 3, None)
//!     .await;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`assembly`] - Prompt construction, generation and fallback synthesis
//! - [`llm`] - Chat completion client (OpenRouter)
//! - [`retrieval`] - Source adapters, URL fetching and the aggregator
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and text helpers
//!
//! ## Failure Model
//!
//! Every retrieval branch degrades to empty on failure and the assembler
//! degrades to a deterministic extractive answer when generation is
//! unavailable, so `/api/ask` keeps answering with whatever evidence
//! survived. Degraded responses are marked with a `warning` field.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Answer assembly: prompts, generation, fallback synthesis.
pub mod assembly;
/// Chat completion clients and abstractions.
pub mod llm;
/// Reference source adapters and the fan-out aggregator.
pub mod retrieval;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and text utilities.
pub mod utils;

// Re-export commonly used types
pub use assembly::{AnswerAssembler, AssembledAnswer};
pub use llm::{ChatClient, OpenRouterClient};
pub use retrieval::{SearchAggregator, SourceAdapter};
pub use types::{AppError, Result, RetrievedDocument, SourceTag};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration
    pub config: Arc<Config>,
    /// Fan-out search over the configured reference sources
    pub aggregator: Arc<SearchAggregator>,
    /// Answer generation with deterministic fallback
    pub assembler: Arc<AnswerAssembler>,
}

impl AppState {
    /// Build the shared state from configuration: one shared search
    /// client, the default source adapters and an OpenRouter-backed
    /// assembler.
    pub async fn from_config(config: Config) -> Result<Self> {
        let client = retrieval::http::shared_client(config.retrieval.search_timeout_secs).await?;
        let aggregator = SearchAggregator::with_default_sources(
            client.clone(),
            config.retrieval.nasa_api_key.clone(),
        );
        let llm = OpenRouterClient::new(config.openrouter.clone())?;

        Ok(AppState {
            config: Arc::new(config),
            aggregator: Arc::new(aggregator),
            assembler: Arc::new(AnswerAssembler::new(Arc::new(llm))),
        })
    }
}
