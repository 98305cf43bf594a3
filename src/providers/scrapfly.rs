use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{RENDER_TIMEOUT_MS, RENDER_WAIT_MS, ScrapeProvider, ensure_success};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::{ScrapeRequest, ScrapeResult};

#[derive(Deserialize)]
struct ScrapflyResponse {
    result: Option<ScrapflyResult>,
}

#[derive(Deserialize)]
struct ScrapflyResult {
    content: Option<String>,
    title: Option<String>,
}

/// ScrapFly scrape API with JS rendering and anti-scraping protection enabled.
pub struct ScrapflyProvider {
    client: Client,
    config: ProviderConfig,
}

impl ScrapflyProvider {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ScrapeProvider for ScrapflyProvider {
    fn id(&self) -> &'static str {
        "scrapfly"
    }

    fn name(&self) -> &'static str {
        "ScrapFly"
    }

    async fn attempt(&self, request: &ScrapeRequest) -> Result<ScrapeResult, ProviderError> {
        let wait = RENDER_WAIT_MS.to_string();
        let timeout = RENDER_TIMEOUT_MS.to_string();

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("url", request.url()),
                ("format", "markdown"),
                ("render_js", "true"),
                ("wait", wait.as_str()),
                ("timeout", timeout.as_str()),
                ("asp", "true"),
            ])
            .send()
            .await?;

        let parsed: ScrapflyResponse = ensure_success(response).await?.json().await?;
        let result = parsed
            .result
            .ok_or_else(|| ProviderError::invalid("ScrapFly response has no result"))?;
        let content = result
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProviderError::invalid("ScrapFly returned no content"))?;

        Ok(ScrapeResult::success(self.id(), content, result.title.unwrap_or_default()))
    }
}
