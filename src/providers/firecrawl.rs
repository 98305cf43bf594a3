use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RENDER_TIMEOUT_MS, RENDER_WAIT_MS, ScrapeProvider, ensure_success};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::{ScrapeRequest, ScrapeResult};

const INCLUDE_TAGS: [&str; 7] = ["title", "meta", "h1", "h2", "h3", "p", "a"];
const EXCLUDE_TAGS: [&str; 5] = ["script", "style", "nav", "footer", "ads"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FirecrawlRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
    include_tags: &'static [&'static str],
    exclude_tags: &'static [&'static str],
    wait_for: u64,
    timeout: u64,
}

#[derive(Deserialize)]
struct FirecrawlResponse {
    #[serde(default)]
    success: bool,
    data: Option<FirecrawlData>,
}

#[derive(Deserialize)]
struct FirecrawlData {
    markdown: Option<String>,
    metadata: Option<FirecrawlMetadata>,
}

#[derive(Deserialize)]
struct FirecrawlMetadata {
    title: Option<String>,
}

/// Firecrawl `/scrape`, returning markdown.
pub struct FirecrawlProvider {
    client: Client,
    config: ProviderConfig,
}

impl FirecrawlProvider {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ScrapeProvider for FirecrawlProvider {
    fn id(&self) -> &'static str {
        "firecrawl"
    }

    fn name(&self) -> &'static str {
        "Firecrawl"
    }

    async fn attempt(&self, request: &ScrapeRequest) -> Result<ScrapeResult, ProviderError> {
        let body = FirecrawlRequest {
            url: request.url(),
            formats: ["markdown", "html"],
            include_tags: &INCLUDE_TAGS,
            exclude_tags: &EXCLUDE_TAGS,
            wait_for: RENDER_WAIT_MS,
            timeout: RENDER_TIMEOUT_MS,
        };

        let response = self
            .client
            .post(format!("{}/scrape", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: FirecrawlResponse = ensure_success(response).await?.json().await?;
        if !parsed.success {
            return Err(ProviderError::invalid("Firecrawl reported success=false"));
        }

        let data = parsed
            .data
            .ok_or_else(|| ProviderError::invalid("Firecrawl response has no data"))?;
        let markdown = data
            .markdown
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ProviderError::invalid("Firecrawl returned no markdown"))?;
        let title = data.metadata.and_then(|m| m.title).unwrap_or_default();

        Ok(ScrapeResult::success(self.id(), markdown, title))
    }
}
