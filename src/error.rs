use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InputError(String),
}

/// Failure of a single provider attempt. Never escapes the fallback chain.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse(message.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Request(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
