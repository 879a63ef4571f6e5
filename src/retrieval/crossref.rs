use crate::retrieval::adapter::SourceAdapter;
use crate::types::{Result, RetrievedDocument, SourceTag};
use async_trait::async_trait;
use serde::Deserialize;

/// Production endpoint for the CrossRef REST API.
pub const CROSSREF_BASE_URL: &str = "https://api.crossref.org";

const TITLE_PLACEHOLDER: &str = "CrossRef Work";

/// Citation metadata search against the CrossRef works index.
pub struct CrossrefAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl CrossrefAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, CROSSREF_BASE_URL)
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
impl SourceAdapter for CrossrefAdapter {
    fn source(&self) -> SourceTag {
        SourceTag::Crossref
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedDocument>> {
        tracing::debug!(%query, max_results, "querying CrossRef");

        let rows = max_results.to_string();
        let response: WorksResponse = self
            .client
            .get(format!("{}/works", self.base_url))
            .query(&[("query", query), ("rows", rows.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .message
            .items
            .into_iter()
            .take(max_results)
            .map(map_work)
            .collect())
    }
}

fn map_work(work: Work) -> RetrievedDocument {
    let title = work
        .title
        .into_iter()
        .next()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let authors: Vec<String> = work
        .author
        .into_iter()
        .filter_map(|author| {
            let name = [author.given, author.family]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!name.is_empty()).then_some(name)
        })
        .collect();

    let year = work
        .issued
        .and_then(|date| date.date_parts.into_iter().next())
        .and_then(|parts| parts.into_iter().next())
        .flatten();

    RetrievedDocument {
        title,
        url: work.url,
        summary: None,
        // CrossRef has no abstract in the works listing; the journal
        // title stands in as the short descriptive field.
        snippet: work
            .container_title
            .into_iter()
            .next()
            .filter(|t| !t.is_empty()),
        authors: (!authors.is_empty()).then_some(authors),
        year,
        source: SourceTag::Crossref,
    }
}

// ============= CrossRef Wire Shapes =============

#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    message: WorksMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct Work {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(default)]
    author: Vec<WorkAuthor>,
    issued: Option<WorkDate>,
    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WorkAuthor {
    given: Option<String>,
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_work_joins_author_names_and_reads_issued_year() {
        let work = Work {
            title: vec!["Bone density loss in orbit".to_string()],
            url: Some("https://doi.org/10.1000/example".to_string()),
            author: vec![
                WorkAuthor {
                    given: Some("Ada".to_string()),
                    family: Some("Lovelace".to_string()),
                },
                WorkAuthor {
                    given: None,
                    family: Some("Curie".to_string()),
                },
                WorkAuthor {
                    given: None,
                    family: None,
                },
            ],
            issued: Some(WorkDate {
                date_parts: vec![vec![Some(2020), Some(6), Some(1)]],
            }),
            container_title: vec!["npj Microgravity".to_string()],
        };

        let doc = map_work(work);
        assert_eq!(doc.title, "Bone density loss in orbit");
        assert_eq!(
            doc.authors,
            Some(vec!["Ada Lovelace".to_string(), "Curie".to_string()])
        );
        assert_eq!(doc.year, Some(2020));
        assert_eq!(doc.snippet.as_deref(), Some("npj Microgravity"));
        assert_eq!(doc.source, SourceTag::Crossref);
    }

    #[test]
    fn test_map_work_handles_sparse_records() {
        let work = Work {
            title: vec![],
            url: None,
            author: vec![],
            issued: Some(WorkDate {
                date_parts: vec![vec![None]],
            }),
            container_title: vec![],
        };

        let doc = map_work(work);
        assert_eq!(doc.title, "CrossRef Work");
        assert!(doc.url.is_none());
        assert!(doc.authors.is_none());
        assert!(doc.year.is_none());
        assert!(doc.snippet.is_none());
    }
}
