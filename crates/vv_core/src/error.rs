use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape used across the analysis layers.
///
/// Codes are grouped by prefix: `INPUT_*` (request rejected before any external call),
/// `MODEL_*` (invocation or response contract failures) and `CONFIG_*` (startup).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is_input_error(&self) -> bool {
        self.code.starts_with("INPUT_")
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Failure category reported across the public boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisErrorKind {
    /// Media pipelines (image, audio, video).
    FlowExecutionFailed,
    /// Article pipeline.
    ApiExecutionFailed,
}

impl AnalysisErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisErrorKind::FlowExecutionFailed => "FLOW_EXECUTION_FAILED",
            AnalysisErrorKind::ApiExecutionFailed => "API_EXECUTION_FAILED",
        }
    }
}

/// Tagged failure value returned in place of an analysis result.
///
/// Serializes as `{ "error": <kind>, "code": <AppError code>, "details": <text> }` so a
/// caller can treat the presence of `error` as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisError {
    #[serde(rename = "error")]
    pub kind: AnalysisErrorKind,
    pub code: String,
    pub details: String,
}

impl AnalysisError {
    pub fn from_app_error(kind: AnalysisErrorKind, err: AppError) -> Self {
        let details = match err.details {
            Some(d) if !d.is_empty() => format!("{} ({})", err.message, d),
            _ => err.message,
        };
        Self {
            kind,
            code: err.code,
            details,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind.as_str(), self.code, self.details)
    }
}

impl std::error::Error for AnalysisError {}

/// Bounded excerpt of model output for error details; never splits a char.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
