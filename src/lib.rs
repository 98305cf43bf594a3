pub mod config;
pub mod error;
pub mod extract;
pub mod hook_log;
pub mod models;
pub mod output;
pub mod providers;
pub mod query;
pub mod runner;

pub use config::{Config, ProviderConfig};
pub use error::{AppError, ProviderError, Result};
pub use hook_log::HookLog;
pub use models::{HookPayload, ScrapeRequest, ScrapeResult};
pub use output::HookOutput;
pub use providers::ScrapeProvider;
pub use runner::{FallbackRunner, Resolution};
