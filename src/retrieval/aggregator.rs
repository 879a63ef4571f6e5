use crate::retrieval::adapter::SourceAdapter;
use crate::retrieval::arxiv::ArxivAdapter;
use crate::retrieval::crossref::CrossrefAdapter;
use crate::retrieval::fetcher::UrlFetcher;
use crate::retrieval::pubmed::PubmedAdapter;
use crate::retrieval::techport::TechportAdapter;
use crate::types::{RetrievedDocument, SourceTag};
use futures::future::join_all;
use std::sync::Arc;

/// Fans a query out to every selected source and merges the results.
///
/// Branches run as independent spawned tasks joined settle-all: each
/// branch's outcome is collected regardless of its siblings, so a failed
/// or panicked branch costs only its own documents. Concatenation follows
/// adapter registration order, then URL documents; no ordering is defined
/// across the merged set.
pub struct SearchAggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    fetcher: Arc<UrlFetcher>,
}

impl SearchAggregator {
    /// Aggregator over an explicit adapter set (tests inject stubs here).
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, fetcher: UrlFetcher) -> Self {
        Self {
            adapters,
            fetcher: Arc::new(fetcher),
        }
    }

    /// Production wiring: NASA TechPort, arXiv, PubMed and CrossRef, in
    /// that registration order, all sharing one search client.
    pub fn with_default_sources(
        client: reqwest::Client,
        nasa_api_key: impl Into<String>,
    ) -> Self {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(TechportAdapter::new(client.clone(), nasa_api_key)),
            Arc::new(ArxivAdapter::new(client.clone())),
            Arc::new(PubmedAdapter::new(client.clone())),
            Arc::new(CrossrefAdapter::new(client.clone())),
        ];
        Self::new(adapters, UrlFetcher::new(client))
    }

    /// Query every selected source concurrently and concatenate whatever
    /// succeeded. `max_per_source` caps each adapter individually, so the
    /// merged total may reach `max_per_source × selected adapters` plus
    /// one document per fetched URL.
    pub async fn aggregate(
        &self,
        query: &str,
        selected: &[SourceTag],
        max_per_source: usize,
        urls: Option<&[String]>,
    ) -> Vec<RetrievedDocument> {
        let mut branches = Vec::new();

        for adapter in &self.adapters {
            if !selected.contains(&adapter.source()) {
                continue;
            }
            let adapter = Arc::clone(adapter);
            let query = query.to_string();
            branches.push(tokio::spawn(async move {
                adapter.search(&query, max_per_source).await
            }));
        }

        if selected.contains(&SourceTag::Url) {
            if let Some(urls) = urls.filter(|urls| !urls.is_empty()) {
                let fetcher = Arc::clone(&self.fetcher);
                let urls = urls.to_vec();
                branches.push(tokio::spawn(async move { fetcher.fetch(&urls).await }));
            }
        }

        let mut documents = Vec::new();
        for branch in join_all(branches).await {
            match branch {
                Ok(docs) => documents.extend(docs),
                Err(err) => tracing::warn!(error = %err, "aggregation branch panicked"),
            }
        }

        tracing::debug!(total = documents.len(), "aggregation complete");
        documents
    }
}
