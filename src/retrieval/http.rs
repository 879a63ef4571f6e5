use crate::types::{AppError, Result};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Default per-request timeout for search traffic, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

static SHARED_CLIENT: OnceCell<reqwest::Client> = OnceCell::const_new();

/// Process-wide search client, built once on first use and reused for every
/// adapter call and URL fetch so connection pools are shared.
///
/// Initialization is single-flight: concurrent first callers await the same
/// in-flight construction instead of racing duplicates. The first caller's
/// timeout wins; later calls reuse the cached client unchanged.
pub async fn shared_client(timeout_secs: u64) -> Result<&'static reqwest::Client> {
    SHARED_CLIENT
        .get_or_try_init(|| async move { build_client(timeout_secs) })
        .await
}

/// Build a standalone search client with the given per-request timeout.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(APP_USER_AGENT)
        .build()
        .map_err(|err| AppError::Config(format!("failed to build HTTP client: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_client_returns_same_instance() {
        let a = shared_client(DEFAULT_SEARCH_TIMEOUT_SECS).await.unwrap();
        let b = shared_client(DEFAULT_SEARCH_TIMEOUT_SECS).await.unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
