use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::runner::Resolution;

/// The single JSON object the hook prints on stdout.
#[derive(Debug, Serialize)]
pub struct HookOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub content: String,
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HookOutput {
    pub fn from_resolution(resolution: Resolution) -> Self {
        let Resolution { request, result } = resolution;
        Self {
            success: result.success,
            error: None,
            content: result.content,
            title: result.title,
            source: result.source,
            url: Some(request.url().to_string()),
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Output for a run that never reached the providers.
    pub fn fatal(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            content: String::new(),
            title: String::new(),
            source: "error".to_string(),
            url: None,
            timestamp: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}
