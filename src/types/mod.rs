use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub references: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ============= Document Types =============

/// Provenance tag for a retrieved document. Retained on every record
/// because origin cannot be reconstructed after results are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Nasa,
    Arxiv,
    Pubmed,
    Crossref,
    Url,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Nasa => "nasa",
            SourceTag::Arxiv => "arxiv",
            SourceTag::Pubmed => "pubmed",
            SourceTag::Crossref => "crossref",
            SourceTag::Url => "url",
        }
    }

    /// Parse a single wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<SourceTag> {
        match name.trim().to_lowercase().as_str() {
            "nasa" => Some(SourceTag::Nasa),
            "arxiv" => Some(SourceTag::Arxiv),
            "pubmed" => Some(SourceTag::Pubmed),
            "crossref" => Some(SourceTag::Crossref),
            "url" => Some(SourceTag::Url),
            _ => None,
        }
    }

    /// Parse a caller-supplied source list, dropping unknown names and
    /// duplicates while preserving first-seen order.
    pub fn parse_list(names: &[String]) -> Vec<SourceTag> {
        let mut tags = Vec::new();
        for name in names {
            if let Some(tag) = SourceTag::parse(name) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common document shape produced by every source adapter.
///
/// `title` and `source` are always present; everything else is optional
/// and a title-only record is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub source: SourceTag,
}

impl RetrievedDocument {
    pub fn new(title: impl Into<String>, source: SourceTag) -> Self {
        Self {
            title: title.into(),
            url: None,
            summary: None,
            snippet: None,
            authors: None,
            year: None,
            source,
        }
    }

    /// Best available citation text: a non-empty `summary` wins over
    /// `snippet`.
    pub fn excerpt(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.snippet.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Numbered citation entry; derived from the aggregated document list,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub index: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub source: SourceTag,
}

impl Reference {
    /// Enumerate documents into 1-based references, preserving input order.
    pub fn enumerate(documents: &[RetrievedDocument]) -> Vec<Reference> {
        documents
            .iter()
            .enumerate()
            .map(|(i, doc)| Reference {
                index: i + 1,
                title: doc.title.clone(),
                url: doc.url.clone(),
                source: doc.source,
            })
            .collect()
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Upstream(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Decode(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::LLM(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
