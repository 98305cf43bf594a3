use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use web_search_hook::{
    AppError, Config, FallbackRunner, HookLog, HookOutput, HookPayload, Result,
};

#[derive(Debug, Parser)]
#[command(
    name = "web-search-hook",
    version,
    about = "Scrape a URL or search query through Firecrawl, ScrapFly and Browserless"
)]
struct Cli {
    /// URL, search query, or a JSON payload like {"url": "..."} / {"query": "..."}.
    /// Read from stdin when omitted.
    input: Option<String>,

    /// Directory for the daily attempt log (overrides HOOK_LOG_DIR).
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the JSON result, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let output = match Config::load() {
        Ok(mut config) => {
            if let Some(dir) = cli.log_dir {
                config.log_dir = dir;
            }
            let log = HookLog::new(config.log_dir.clone());
            match run(cli.input, &config, &log).await {
                Ok(output) => output,
                Err(e) => fatal(Some(&log), e),
            }
        }
        Err(e) => fatal(None, e),
    };

    match serde_json::to_string(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Could not encode output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::from(output.exit_code() as u8)
}

async fn run(input: Option<String>, config: &Config, log: &HookLog) -> Result<HookOutput> {
    let raw = match input {
        Some(input) => input,
        None => read_stdin()?,
    };
    let payload = HookPayload::parse(&raw)?;
    let Some(target) = payload.target() else {
        return Err(AppError::InputError("No URL provided to web search hook".to_string()));
    };

    log.info(&format!("Web search hook triggered for: {}", target));
    let runner = FallbackRunner::from_config(config, log.clone())?;
    let resolution = runner.resolve(target).await?;

    Ok(HookOutput::from_resolution(resolution))
}

/// Records a run-ending error once, in the daily log when one is available.
fn fatal(log: Option<&HookLog>, err: AppError) -> HookOutput {
    let message = format!("Hook execution failed: {}", err);
    match log {
        Some(log) => log.error(&message),
        None => tracing::error!("{}", message),
    }
    HookOutput::fatal(err.to_string())
}

fn read_stdin() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut raw = String::new();
    stdin
        .read_to_string(&mut raw)
        .map_err(|e| AppError::InputError(format!("Could not read stdin: {}", e)))?;
    Ok(raw)
}
