use crate::types::{Result, RetrievedDocument, SourceTag};
use crate::utils::text::{collapse_whitespace, truncate_chars};
use futures::future::join_all;
use scraper::Html;

/// Maximum characters kept from a fetched page.
pub const MAX_SNIPPET_CHARS: usize = 1000;

/// Fetches caller-supplied URLs and reduces each page to a bounded
/// plain-text snippet. The page URL doubles as the document title; no
/// HTML title parsing is attempted.
pub struct UrlFetcher {
    client: reqwest::Client,
}

impl UrlFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch every URL concurrently. Per-URL failures are isolated: a
    /// failed fetch is dropped from the output after a warning, never
    /// retried.
    pub async fn fetch(&self, urls: &[String]) -> Vec<RetrievedDocument> {
        let mut handles = Vec::with_capacity(urls.len());
        for url in urls {
            let client = self.client.clone();
            let url = url.clone();
            handles.push(tokio::spawn(async move { fetch_one(client, url).await }));
        }

        let mut documents = Vec::new();
        for settled in join_all(handles).await {
            match settled {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "URL fetch task failed"),
            }
        }
        documents
    }
}

async fn fetch_one(client: reqwest::Client, url: String) -> Option<RetrievedDocument> {
    let body = match request_text(&client, &url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(%url, error = %err, "dropping unfetchable URL");
            return None;
        }
    };

    let mut doc = RetrievedDocument::new(url.clone(), SourceTag::Url);
    doc.url = Some(url);
    doc.snippet = Some(page_snippet(&body));
    Some(doc)
}

async fn request_text(client: &reqwest::Client, url: &str) -> Result<String> {
    Ok(client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?)
}

/// Markup-stripped, whitespace-collapsed page text capped at
/// [`MAX_SNIPPET_CHARS`]. Non-HTML bodies pass through as bare text.
fn page_snippet(body: &str) -> String {
    let document = Html::parse_document(body);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapse_whitespace(&text), MAX_SNIPPET_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_snippet_strips_tags() {
        let html = "<html><body><h1>Mice in space</h1><p>lost  bone\nmass</p></body></html>";
        assert_eq!(page_snippet(html), "Mice in space lost bone mass");
    }

    #[test]
    fn test_page_snippet_caps_length() {
        let html = format!("<p>{}</p>", "word ".repeat(400));
        assert_eq!(page_snippet(&html).chars().count(), MAX_SNIPPET_CHARS);
    }

    #[test]
    fn test_page_snippet_passes_plain_text_through() {
        assert_eq!(page_snippet("just plain text"), "just plain text");
    }
}
