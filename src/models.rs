use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::query;

/// What the runner dispatches to providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    input: String,
    url: String,
}

impl ScrapeRequest {
    /// Inputs without an `http(s)://` prefix are treated as search queries and
    /// rewritten against `search_base`.
    pub fn new(input: &str, search_base: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::InputError("No URL provided to web search hook".to_string()));
        }

        let url = if query::has_scheme(input) {
            input.to_string()
        } else {
            query::search_url(search_base, input)
        };

        Ok(Self {
            input: input.to_string(),
            url,
        })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_search(&self) -> bool {
        self.input != self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub success: bool,
    pub content: String,
    pub title: String,
    pub source: String,
}

impl ScrapeResult {
    pub fn success(source: &str, content: String, title: String) -> Self {
        Self {
            success: true,
            content,
            title,
            source: source.to_string(),
        }
    }

    /// Returned when every provider in the chain has failed.
    pub fn exhausted() -> Self {
        Self {
            success: false,
            content: String::new(),
            title: String::new(),
            source: "none".to_string(),
        }
    }

    /// Caps `content` at `max_chars` characters.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if let Some((end, _)) = self.content.char_indices().nth(max_chars) {
            self.content.truncate(end);
        }
        self
    }
}

/// Hook invocation payload: `{"url": ...}` or `{"query": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct HookPayload {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl HookPayload {
    /// Accepts either a JSON object or a bare URL/query string.
    ///
    /// Input that opens with `{` must be a well-formed payload.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') {
            return serde_json::from_str::<HookPayload>(trimmed)
                .map_err(|e| AppError::InputError(format!("Malformed hook payload: {}", e)));
        }
        Ok(HookPayload {
            url: Some(trimmed.to_string()),
            query: None,
        })
    }

    pub fn target(&self) -> Option<&str> {
        [self.url.as_deref(), self.query.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE: &str = "https://www.google.com/search";

    #[test]
    fn url_input_is_kept() {
        let req = ScrapeRequest::new("  https://example.com/a  ", GOOGLE).unwrap();
        assert_eq!(req.url(), "https://example.com/a");
        assert!(!req.is_search());
    }

    #[test]
    fn query_input_is_rewritten() {
        let req = ScrapeRequest::new("rust ownership model", GOOGLE).unwrap();
        assert_eq!(req.url(), "https://www.google.com/search?q=rust%20ownership%20model");
        assert_eq!(req.input(), "rust ownership model");
        assert!(req.is_search());
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(ScrapeRequest::new("   ", GOOGLE), Err(AppError::InputError(_))));
    }

    #[test]
    fn truncation_counts_characters() {
        let result = ScrapeResult::success("firecrawl", "héllo wörld".to_string(), String::new());
        assert_eq!(result.clone().truncated(5).content, "héllo");
        assert_eq!(result.clone().truncated(100).content, "héllo wörld");
        assert_eq!(result.truncated(0).content, "");
    }

    #[test]
    fn exhausted_result_is_empty() {
        let result = ScrapeResult::exhausted();
        assert!(!result.success);
        assert_eq!(result.source, "none");
        assert!(result.content.is_empty());
        assert!(result.title.is_empty());
    }

    #[test]
    fn payload_prefers_url_over_query() {
        let payload =
            HookPayload::parse(r#"{"url": "https://a.example", "query": "ignored"}"#).unwrap();
        assert_eq!(payload.target(), Some("https://a.example"));

        let payload = HookPayload::parse(r#"{"query": "rust ownership model"}"#).unwrap();
        assert_eq!(payload.target(), Some("rust ownership model"));
    }

    #[test]
    fn payload_falls_back_to_raw_text() {
        assert_eq!(HookPayload::parse("plain words").unwrap().target(), Some("plain words"));
        assert_eq!(HookPayload::parse("{}").unwrap().target(), None);
        assert_eq!(HookPayload::parse("  ").unwrap().target(), None);
    }

    #[test]
    fn malformed_payload_is_rejected() {
        for raw in [
            r#"{"url": "https://a.example""#,
            r#"{"url": 5}"#,
            r#"{"query": ["a", "b"]}"#,
            "{not json}",
        ] {
            assert!(
                matches!(HookPayload::parse(raw), Err(AppError::InputError(_))),
                "accepted {raw}"
            );
        }
    }
}
