use crate::retrieval::adapter::{leading_year, SourceAdapter};
use crate::types::{Result, RetrievedDocument, SourceTag};
use crate::utils::text::truncate_chars;
use async_trait::async_trait;
use serde_json::Value;

/// Production endpoint for the NASA TechPort API.
pub const TECHPORT_BASE_URL: &str = "https://techport.nasa.gov";

/// Key accepted by api.nasa.gov without registration, rate-limited.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

const PROJECT_VIEW_BASE: &str = "https://techport.nasa.gov/view";
const TITLE_PLACEHOLDER: &str = "NASA Project";
const SNIPPET_CHARS: usize = 240;

// TechPort deployments disagree on where the project array lives and what
// the per-project fields are called; candidates are probed in order.
const PROJECT_ARRAY_POINTERS: &[&str] =
    &["/projects", "/results", "/projectSearchResult/projects"];
const TITLE_KEYS: &[&str] = &["title", "projectTitle"];
const ID_KEYS: &[&str] = &["id", "projectId"];
const DESCRIPTION_KEYS: &[&str] = &["description", "projectDescription"];

/// Agency project search against NASA TechPort.
pub struct TechportAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TechportAdapter {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, TECHPORT_BASE_URL, api_key)
    }

    /// Point the adapter at an alternate endpoint (used by tests).
    pub fn with_base_url(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for TechportAdapter {
    fn source(&self) -> SourceTag {
        SourceTag::Nasa
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedDocument>> {
        tracing::debug!(%query, max_results, "querying NASA TechPort");

        let payload: Value = self
            .client
            .get(format!("{}/api/projects/search", self.base_url))
            .query(&[("searchQuery", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let projects = match first_array(&payload, PROJECT_ARRAY_POINTERS) {
            Some(projects) => projects,
            None => {
                tracing::debug!("TechPort response carried no project array");
                return Ok(Vec::new());
            }
        };

        Ok(projects
            .iter()
            .take(max_results)
            .map(map_project)
            .collect())
    }
}

fn map_project(project: &Value) -> RetrievedDocument {
    let title =
        first_string(project, TITLE_KEYS).unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());
    let id = first_id(project, ID_KEYS);
    let description = first_string(project, DESCRIPTION_KEYS);
    let snippet = description
        .as_deref()
        .map(|desc| truncate_chars(desc, SNIPPET_CHARS));

    RetrievedDocument {
        title,
        url: id.map(|id| format!("{PROJECT_VIEW_BASE}/{id}")),
        summary: description,
        snippet,
        authors: None,
        year: project
            .get("lastUpdated")
            .and_then(Value::as_str)
            .and_then(leading_year),
        source: SourceTag::Nasa,
    }
}

/// First candidate pointer that resolves to an array.
fn first_array<'a>(payload: &'a Value, pointers: &[&str]) -> Option<&'a Vec<Value>> {
    pointers
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_array))
}

/// First candidate key holding a non-empty string.
fn first_string(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| {
            item.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}

/// First candidate key holding an identifier, string or numeric.
fn first_id(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
