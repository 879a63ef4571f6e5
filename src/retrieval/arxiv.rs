use crate::retrieval::adapter::SourceAdapter;
use crate::types::{AppError, Result, RetrievedDocument, SourceTag};
use async_trait::async_trait;
use chrono::Datelike;
use serde::Deserialize;

/// Production endpoint for the arXiv query API.
pub const ARXIV_BASE_URL: &str = "http://export.arxiv.org";

const TITLE_PLACEHOLDER: &str = "arXiv entry";

/// Preprint search against the arXiv Atom feed.
pub struct ArxivAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, ARXIV_BASE_URL)
    }

    /// Point the adapter at an alternate endpoint (used by tests).
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for ArxivAdapter {
    fn source(&self) -> SourceTag {
        SourceTag::Arxiv
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedDocument>> {
        tracing::debug!(%query, max_results, "querying arXiv");

        let body = self
            .client
            .get(format!("{}/api/query", self.base_url))
            .query(&[
                ("search_query", format!("all:{query}")),
                ("start", "0".to_string()),
                ("max_results", max_results.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let feed: AtomFeed = quick_xml::de::from_str(&body)
            .map_err(|err| AppError::Decode(format!("arXiv feed: {err}")))?;

        Ok(feed
            .entries
            .into_iter()
            .take(max_results)
            .map(map_entry)
            .collect())
    }
}

fn map_entry(entry: AtomEntry) -> RetrievedDocument {
    let title = entry
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let authors: Vec<String> = entry
        .authors
        .into_iter()
        .filter_map(|author| author.name)
        .filter(|name| !name.is_empty())
        .collect();

    RetrievedDocument {
        title,
        url: entry.id,
        summary: entry.summary.map(|s| s.trim().to_string()),
        snippet: None,
        authors: (!authors.is_empty()).then_some(authors),
        year: entry.published.as_deref().and_then(published_year),
        source: SourceTag::Arxiv,
    }
}

fn published_year(published: &str) -> Option<i32> {
    chrono::DateTime::parse_from_rfc3339(published.trim())
        .ok()
        .map(|date| date.year())
}

// ============= Atom Feed Shapes =============

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    name: Option<String>,
}
