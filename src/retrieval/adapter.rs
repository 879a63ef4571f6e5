use crate::types::{Result, RetrievedDocument, SourceTag};
use async_trait::async_trait;

/// One external search provider.
///
/// Implementations hold their own `reqwest::Client` and base URL, issue at
/// most two outbound requests per call, and map the provider's response
/// into [`RetrievedDocument`]s with a fixed [`SourceTag`].
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Provenance tag stamped on every document this adapter returns.
    fn source(&self) -> SourceTag;

    /// Query the upstream API. Fallible; aggregation goes through
    /// [`search`](SourceAdapter::search) instead.
    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedDocument>>;

    /// Degrade-to-empty search: network failures, non-success statuses and
    /// malformed payloads are absorbed here and surface as an empty list,
    /// so one unavailable provider never aborts aggregation.
    async fn search(&self, query: &str, max_results: usize) -> Vec<RetrievedDocument> {
        match self.try_search(query, max_results).await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(
                    source = %self.source(),
                    error = %err,
                    "upstream search failed, returning no documents"
                );
                Vec::new()
            }
        }
    }
}

/// Parse a publication year from the leading four characters of a date
/// string ("2023 Nov 15", "2024-01-05", ...).
pub(crate) fn leading_year(date: &str) -> Option<i32> {
    date.trim()
        .get(..4)
        .and_then(|prefix| prefix.parse::<i32>().ok())
        .filter(|year| *year > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_year_handles_common_formats() {
        assert_eq!(leading_year("2023 Nov 15"), Some(2023));
        assert_eq!(leading_year("2024-01-05"), Some(2024));
        assert_eq!(leading_year(" 1999"), Some(1999));
        assert_eq!(leading_year("Nov 2023"), None);
        assert_eq!(leading_year(""), None);
    }
}
