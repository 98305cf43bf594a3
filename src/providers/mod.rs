//! External scraping providers, tried in order by the fallback runner.

mod browserless;
mod firecrawl;
mod scrapfly;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};

use crate::config::Config;
use crate::error::{AppError, ProviderError, Result};
use crate::models::{ScrapeRequest, ScrapeResult};

pub use browserless::BrowserlessProvider;
pub use firecrawl::FirecrawlProvider;
pub use scrapfly::ScrapflyProvider;

/// How long the remote service may spend rendering a page, in milliseconds.
pub(crate) const RENDER_TIMEOUT_MS: u64 = 30_000;
/// How long the remote service waits after load before capturing, in milliseconds.
pub(crate) const RENDER_WAIT_MS: u64 = 2_000;

#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    /// Identifier reported as `source` in results and output.
    fn id(&self) -> &'static str;

    /// Human-readable name used in log lines.
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        request: &ScrapeRequest,
    ) -> std::result::Result<ScrapeResult, ProviderError>;
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Firecrawl, ScrapFly, then Browserless, sharing one HTTP client.
pub fn default_chain(config: &Config) -> Result<Vec<Arc<dyn ScrapeProvider>>> {
    let client = build_client(config.timeout)?;

    Ok(vec![
        Arc::new(FirecrawlProvider::new(client.clone(), config.firecrawl.clone())),
        Arc::new(ScrapflyProvider::new(client.clone(), config.scrapfly.clone())),
        Arc::new(BrowserlessProvider::new(client, config.browserless.clone())),
    ])
}

/// Turns any non-2xx response into a [`ProviderError::Status`].
pub(crate) async fn ensure_success(
    response: Response,
) -> std::result::Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status,
        body: body.chars().take(200).collect(),
    })
}
