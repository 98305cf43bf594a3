use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::hook_log::HookLog;
use crate::models::{ScrapeRequest, ScrapeResult};
use crate::providers::{self, ScrapeProvider};

/// The request as dispatched and what the chain produced for it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub request: ScrapeRequest,
    pub result: ScrapeResult,
}

/// Tries each provider in order until one succeeds.
///
/// Provider failures are logged and swallowed. The only error `resolve` can
/// return is for input that cannot form a request at all.
pub struct FallbackRunner {
    providers: Vec<Arc<dyn ScrapeProvider>>,
    log: HookLog,
    search_engine_url: String,
    max_content_chars: usize,
}

impl FallbackRunner {
    pub fn new(
        providers: Vec<Arc<dyn ScrapeProvider>>,
        log: HookLog,
        search_engine_url: impl Into<String>,
        max_content_chars: usize,
    ) -> Self {
        Self {
            providers,
            log,
            search_engine_url: search_engine_url.into(),
            max_content_chars,
        }
    }

    /// Runner with the standard Firecrawl, ScrapFly, Browserless chain.
    pub fn from_config(config: &Config, log: HookLog) -> Result<Self> {
        Ok(Self::new(
            providers::default_chain(config)?,
            log,
            config.search_engine_url.clone(),
            config.max_content_chars,
        ))
    }

    pub async fn resolve(&self, input: &str) -> Result<Resolution> {
        let request = ScrapeRequest::new(input, &self.search_engine_url)?;
        if request.is_search() {
            self.log.info(&format!(
                "Converting query \"{}\" to search URL: {}",
                request.input(),
                request.url()
            ));
        }

        let result = self.run_chain(&request).await;
        Ok(Resolution { request, result })
    }

    pub async fn run_chain(&self, request: &ScrapeRequest) -> ScrapeResult {
        let url = request.url();

        for provider in &self.providers {
            let started = Instant::now();
            match provider.attempt(request).await {
                Ok(result) if result.success => {
                    self.log.info(&format!(
                        "{} succeeded for {} in {:?}",
                        provider.name(),
                        url,
                        started.elapsed()
                    ));
                    return result.truncated(self.max_content_chars);
                }
                Ok(_) => {
                    self.log.error(&format!(
                        "{} failed for {}: provider returned an unsuccessful result",
                        provider.name(),
                        url
                    ));
                }
                Err(e) => {
                    self.log
                        .error(&format!("{} failed for {}: {}", provider.name(), url, e));
                }
            }
        }

        self.log.error(&format!("All scrapers failed for {}", url));
        ScrapeResult::exhausted()
    }
}
