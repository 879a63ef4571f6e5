//! Multi-Source Reference Retrieval
//!
//! This module fans a free-text query out to several public search APIs,
//! normalizes every response into the common
//! [`RetrievedDocument`](crate::types::RetrievedDocument) shape and merges
//! the results with per-branch failure isolation.
//!
//! # Module Structure
//!
//! - [`adapter`](crate::retrieval::adapter) - The [`SourceAdapter`] trait and shared helpers
//! - [`arxiv`](crate::retrieval::arxiv) - arXiv Atom feed adapter
//! - [`pubmed`](crate::retrieval::pubmed) - PubMed esearch/esummary adapter
//! - [`crossref`](crate::retrieval::crossref) - CrossRef works adapter
//! - [`techport`](crate::retrieval::techport) - NASA TechPort adapter
//! - [`fetcher`](crate::retrieval::fetcher) - Raw URL fetcher
//! - [`aggregator`](crate::retrieval::aggregator) - Settle-all fan-out over the above
//! - [`http`](crate::retrieval::http) - Shared search client singleton
//!
//! # Failure Model
//!
//! Every adapter absorbs its own upstream failures and degrades to an
//! empty result; the aggregator joins all branches settle-all, so the
//! merged list always contains whatever succeeded. An empty list is a
//! normal outcome, not an error.
//!
//! # Example
//!
//! ```ignore
//! use astra::retrieval::{http, SearchAggregator};
//! use astra::types::SourceTag;
//!
//! let client = http::shared_client(10).await?.clone();
//! let aggregator = SearchAggregator::with_default_sources(client, "DEMO_KEY");
//! let docs = aggregator
//!     .aggregate("microgravity plant growth", &[SourceTag::Arxiv], 3, None)
//!     .await;
//! ```

/// Source adapter trait and shared mapping helpers.
pub mod adapter;
/// Settle-all fan-out over the registered adapters.
pub mod aggregator;
/// arXiv preprint search (Atom XML).
pub mod arxiv;
/// CrossRef citation index search.
pub mod crossref;
/// Raw URL fetching and markup stripping.
pub mod fetcher;
/// Shared search client with single-flight initialization.
pub mod http;
/// PubMed biomedical search (two-step E-utilities protocol).
pub mod pubmed;
/// NASA TechPort project search.
pub mod techport;

pub use adapter::SourceAdapter;
pub use aggregator::SearchAggregator;
pub use arxiv::ArxivAdapter;
pub use crossref::CrossrefAdapter;
pub use fetcher::UrlFetcher;
pub use pubmed::PubmedAdapter;
pub use techport::TechportAdapter;
