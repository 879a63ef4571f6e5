use std::env;
use std::str::FromStr;

use crate::llm::OpenRouterConfig;
use crate::retrieval::http::DEFAULT_SEARCH_TIMEOUT_SECS;
use crate::retrieval::techport::DEMO_API_KEY;
use crate::types::{AppError, Result};

/// Top-level application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub openrouter: OpenRouterConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// TechPort api key; the NASA demo key works unauthenticated.
    pub nasa_api_key: String,
    /// Per-source result cap forwarded to every adapter.
    pub max_per_source: usize,
    /// Timeout applied to each upstream search request.
    pub search_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first.
    ///
    /// Unset variables take their defaults; a variable that is set but
    /// fails to parse is a startup error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let openrouter_defaults = OpenRouterConfig::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 8000)?,
            },
            openrouter: OpenRouterConfig {
                base_url: env::var("OPENROUTER_BASE_URL").unwrap_or(openrouter_defaults.base_url),
                api_key: env::var("OPENROUTER_API_KEY").ok(),
                model: env::var("OPENROUTER_MODEL").unwrap_or(openrouter_defaults.model),
                referer: env::var("OPENROUTER_REFERRER").unwrap_or(openrouter_defaults.referer),
                title: env::var("OPENROUTER_TITLE").ok(),
                timeout_secs: parse_var(
                    "OPENROUTER_TIMEOUT_SECS",
                    openrouter_defaults.timeout_secs,
                )?,
            },
            retrieval: RetrievalConfig {
                nasa_api_key: env::var("NASA_API_KEY")
                    .unwrap_or_else(|_| DEMO_API_KEY.to_string()),
                max_per_source: parse_var("MAX_RESULTS_PER_SOURCE", 3)?,
                search_timeout_secs: parse_var(
                    "SEARCH_TIMEOUT_SECS",
                    DEFAULT_SEARCH_TIMEOUT_SECS,
                )?,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{name} is not a valid number: '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names; from_env touches the real ones,
    // so its phases run inside a single test to keep the process env
    // race-free under the parallel test runner.
    const FROM_ENV_VARS: &[&str] = &[
        "HOST",
        "PORT",
        "OPENROUTER_BASE_URL",
        "OPENROUTER_API_KEY",
        "OPENROUTER_MODEL",
        "OPENROUTER_REFERRER",
        "OPENROUTER_TITLE",
        "OPENROUTER_TIMEOUT_SECS",
        "NASA_API_KEY",
        "MAX_RESULTS_PER_SOURCE",
        "SEARCH_TIMEOUT_SECS",
    ];

    #[test]
    fn test_parse_var_defaults_when_unset() {
        env::remove_var("ASTRA_TEST_UNSET_VAR");
        assert_eq!(parse_var("ASTRA_TEST_UNSET_VAR", 8000u16).unwrap(), 8000);
    }

    #[test]
    fn test_parse_var_rejects_set_but_unparsable_values() {
        env::set_var("ASTRA_TEST_BAD_VAR", "not-a-number");
        let err = parse_var::<u16>("ASTRA_TEST_BAD_VAR", 8000).unwrap_err();
        env::remove_var("ASTRA_TEST_BAD_VAR");

        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("ASTRA_TEST_BAD_VAR"));
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_from_env_defaults_and_rejects_bad_numbers() {
        for name in FROM_ENV_VARS {
            env::remove_var(name);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.openrouter.api_key.is_none());
        assert_eq!(config.openrouter.timeout_secs, 60);
        assert_eq!(config.retrieval.nasa_api_key, DEMO_API_KEY);
        assert_eq!(config.retrieval.max_per_source, 3);
        assert_eq!(
            config.retrieval.search_timeout_secs,
            DEFAULT_SEARCH_TIMEOUT_SECS
        );

        // A set-but-unparsable number is a startup error, not a silent
        // fallback to the default.
        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        env::remove_var("PORT");

        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("PORT"));
        assert!(err.to_string().contains("not-a-port"));
    }
}
