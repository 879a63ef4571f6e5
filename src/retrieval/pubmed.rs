use crate::retrieval::adapter::{leading_year, SourceAdapter};
use crate::types::{Result, RetrievedDocument, SourceTag};
use async_trait::async_trait;
use serde_json::Value;

/// Production endpoint for the NCBI E-utilities.
pub const PUBMED_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const ARTICLE_URL_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";
const TITLE_PLACEHOLDER: &str = "PubMed article";

/// Biomedical literature search via the PubMed esearch/esummary pair.
///
/// Two-step protocol: esearch yields UIDs, esummary resolves them in one
/// batch call. An empty UID list short-circuits without the second call.
pub struct PubmedAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl PubmedAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, PUBMED_BASE_URL)
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
impl SourceAdapter for PubmedAdapter {
    fn source(&self) -> SourceTag {
        SourceTag::Pubmed
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedDocument>> {
        tracing::debug!(%query, max_results, "querying PubMed");

        let retmax = max_results.to_string();
        let search: Value = self
            .client
            .get(format!("{}/esearch.fcgi", self.base_url))
            .query(&[
                ("db", "pubmed"),
                ("term", query),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids: Vec<String> = search
            .pointer("/esearchresult/idlist")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if ids.is_empty() {
            tracing::debug!(%query, "PubMed esearch returned no ids");
            return Ok(Vec::new());
        }

        let id_param = ids.join(",");
        let summary: Value = self
            .client
            .get(format!("{}/esummary.fcgi", self.base_url))
            .query(&[
                ("db", "pubmed"),
                ("id", id_param.as_str()),
                ("retmode", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut documents = Vec::new();
        if let Some(result) = summary.get("result") {
            let uids = result
                .get("uids")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for uid in uids.iter().filter_map(Value::as_str).take(max_results) {
                if let Some(item) = result.get(uid) {
                    documents.push(map_item(uid, item));
                }
            }
        }

        Ok(documents)
    }
}

fn map_item(uid: &str, item: &Value) -> RetrievedDocument {
    let title = item
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(TITLE_PLACEHOLDER)
        .to_string();

    let authors: Vec<String> = item
        .get("authors")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|author| author.get("name").and_then(Value::as_str))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    RetrievedDocument {
        title,
        url: Some(format!("{ARTICLE_URL_BASE}/{uid}/")),
        summary: None,
        // No abstract in esummary payloads; the first-author line serves
        // as the short descriptive field.
        snippet: item
            .get("sortfirstauthor")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        authors: (!authors.is_empty()).then_some(authors),
        year: item
            .get("pubdate")
            .and_then(Value::as_str)
            .and_then(leading_year),
        source: SourceTag::Pubmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_item_fills_url_and_year() {
        let item = json!({
            "title": "Spaceflight alters gene expression",
            "pubdate": "2022 Mar 4",
            "sortfirstauthor": "Doe J",
            "authors": [{"name": "Doe J"}, {"name": "Roe R"}, {"name": ""}]
        });

        let doc = map_item("123456", &item);
        assert_eq!(doc.title, "Spaceflight alters gene expression");
        assert_eq!(
            doc.url.as_deref(),
            Some("https://pubmed.ncbi.nlm.nih.gov/123456/")
        );
        assert_eq!(doc.year, Some(2022));
        assert_eq!(doc.snippet.as_deref(), Some("Doe J"));
        assert_eq!(
            doc.authors,
            Some(vec!["Doe J".to_string(), "Roe R".to_string()])
        );
        assert_eq!(doc.source, SourceTag::Pubmed);
    }

    #[test]
    fn test_map_item_substitutes_placeholder_title() {
        let doc = map_item("9", &json!({}));
        assert_eq!(doc.title, "PubMed article");
        assert!(doc.summary.is_none());
        assert!(doc.snippet.is_none());
        assert!(doc.authors.is_none());
        assert!(doc.year.is_none());
    }
}
