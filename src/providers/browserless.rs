use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{RENDER_TIMEOUT_MS, RENDER_WAIT_MS, ScrapeProvider, ensure_success};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::extract::extract_page;
use crate::models::{ScrapeRequest, ScrapeResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    url: &'a str,
    wait_for: u64,
    goto_options: GotoOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    wait_until: &'static str,
    timeout: u64,
}

/// Browserless `/content`: returns rendered HTML, which is reduced to text here.
pub struct BrowserlessProvider {
    client: Client,
    config: ProviderConfig,
}

impl BrowserlessProvider {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ScrapeProvider for BrowserlessProvider {
    fn id(&self) -> &'static str {
        "browserless"
    }

    fn name(&self) -> &'static str {
        "Browserless"
    }

    async fn attempt(&self, request: &ScrapeRequest) -> Result<ScrapeResult, ProviderError> {
        let body = ContentRequest {
            url: request.url(),
            wait_for: RENDER_WAIT_MS,
            goto_options: GotoOptions {
                wait_until: "networkidle2",
                timeout: RENDER_TIMEOUT_MS,
            },
        };

        let response = self
            .client
            .post(format!("{}/content", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .query(&[("token", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let html = ensure_success(response).await?.text().await?;
        // Html is !Send, keep it out of the await points above.
        let page = extract_page(&html);
        if page.text.is_empty() {
            return Err(ProviderError::invalid("Browserless returned no readable content"));
        }

        Ok(ScrapeResult::success(self.id(), page.text, page.title))
    }
}
