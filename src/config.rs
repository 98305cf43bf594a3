use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const FIRECRAWL_API_KEY: &str = "FIRECRAWL_API_KEY";
pub const SCRAPFLY_API_KEY: &str = "SCRAPFLY_API_KEY";
pub const BROWSERLESS_API_KEY: &str = "BROWSERLESS_API_KEY";

const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev/v0";
const DEFAULT_SCRAPFLY_URL: &str = "https://api.scrapfly.io/scrape";
const DEFAULT_BROWSERLESS_URL: &str = "https://chrome.browserless.io";
const DEFAULT_SEARCH_ENGINE_URL: &str = "https://www.google.com/search";

pub const DEFAULT_MAX_CONTENT_CHARS: usize = 10_000;
const DEFAULT_TIMEOUT_SECS: u64 = 35;

/// Credentials and endpoint for one scraping provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub firecrawl: ProviderConfig,
    pub scrapfly: ProviderConfig,
    pub browserless: ProviderConfig,
    pub search_engine_url: String,
    pub log_dir: PathBuf,
    pub max_content_chars: usize,
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Every provider key is required. Empty values count as missing, and the
    /// error names all of the missing variables at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let value = get(name);
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let firecrawl_key = require(FIRECRAWL_API_KEY);
        let scrapfly_key = require(SCRAPFLY_API_KEY);
        let browserless_key = require(BROWSERLESS_API_KEY);

        if !missing.is_empty() {
            return Err(AppError::MissingCredentials(missing));
        }

        let max_content_chars = match get("HOOK_MAX_CONTENT_CHARS") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| {
                    AppError::ConfigError(format!("Invalid HOOK_MAX_CONTENT_CHARS: {}", e))
                })?,
            None => DEFAULT_MAX_CONTENT_CHARS,
        };

        let timeout_secs = match get("HOOK_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| AppError::ConfigError(format!("Invalid HOOK_TIMEOUT_SECS: {}", e)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "HOOK_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            firecrawl: ProviderConfig::new(
                firecrawl_key,
                get("FIRECRAWL_BASE_URL").unwrap_or_else(|| DEFAULT_FIRECRAWL_URL.to_string()),
            ),
            scrapfly: ProviderConfig::new(
                scrapfly_key,
                get("SCRAPFLY_BASE_URL").unwrap_or_else(|| DEFAULT_SCRAPFLY_URL.to_string()),
            ),
            browserless: ProviderConfig::new(
                browserless_key,
                get("BROWSERLESS_BASE_URL").unwrap_or_else(|| DEFAULT_BROWSERLESS_URL.to_string()),
            ),
            search_engine_url: get("SEARCH_ENGINE_URL")
                .unwrap_or_else(|| DEFAULT_SEARCH_ENGINE_URL.to_string()),
            log_dir: get("HOOK_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            max_content_chars,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const ALL_KEYS: [(&str, &str); 3] = [
        (FIRECRAWL_API_KEY, "fc-key"),
        (SCRAPFLY_API_KEY, "sf-key"),
        (BROWSERLESS_API_KEY, "bl-key"),
    ];

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let config = Config::from_lookup(lookup(&ALL_KEYS)).unwrap();
        assert_eq!(config.firecrawl.api_key, "fc-key");
        assert_eq!(config.firecrawl.base_url, DEFAULT_FIRECRAWL_URL);
        assert_eq!(config.scrapfly.base_url, DEFAULT_SCRAPFLY_URL);
        assert_eq!(config.browserless.base_url, DEFAULT_BROWSERLESS_URL);
        assert_eq!(config.search_engine_url, DEFAULT_SEARCH_ENGINE_URL);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.max_content_chars, 10_000);
        assert_eq!(config.timeout, Duration::from_secs(35));
    }

    #[test]
    fn all_missing_keys_are_reported() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        match err {
            AppError::MissingCredentials(names) => assert_eq!(
                names,
                vec![FIRECRAWL_API_KEY, SCRAPFLY_API_KEY, BROWSERLESS_API_KEY]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn partial_absence_is_fatal_and_names_only_missing() {
        let err = Config::from_lookup(lookup(&[
            (FIRECRAWL_API_KEY, "fc-key"),
            (SCRAPFLY_API_KEY, "   "),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: SCRAPFLY_API_KEY, BROWSERLESS_API_KEY"
        );
    }

    #[test]
    fn overrides_are_read() {
        let mut vars = ALL_KEYS.to_vec();
        vars.push(("FIRECRAWL_BASE_URL", "http://localhost:9000/v0/"));
        vars.push(("HOOK_MAX_CONTENT_CHARS", "500"));
        vars.push(("HOOK_TIMEOUT_SECS", "5"));
        vars.push(("HOOK_LOG_DIR", "/tmp/hook-logs"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.firecrawl.base_url, "http://localhost:9000/v0");
        assert_eq!(config.max_content_chars, 500);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/hook-logs"));
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let mut vars = ALL_KEYS.to_vec();
        vars.push(("HOOK_TIMEOUT_SECS", "soon"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn debug_output_hides_keys() {
        let config = Config::from_lookup(lookup(&ALL_KEYS)).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("fc-key"));
    }
}
