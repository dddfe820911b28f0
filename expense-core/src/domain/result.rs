//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// API calls fail in exactly two ways: the request never produced a usable
/// response (`Transport`), or the response body could not be decoded into the
/// expected record (`Decode`). The remaining variants belong to local concerns
/// such as configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {message}")]
    Transport { message: String, summary: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String, summary: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not logged in: {0}")]
    NotLoggedIn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error whose cause is not worth recording
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            summary: "request failed".to_string(),
        }
    }

    /// Non-success HTTP status
    pub fn status(code: u16, msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            summary: format!("HTTP {}", code),
        }
    }

    pub fn timed_out() -> Self {
        Self::Transport {
            message: "Connection timed out".to_string(),
            summary: "timeout".to_string(),
        }
    }

    pub fn unreachable() -> Self {
        Self::Transport {
            message: "Unable to connect to the Expense Tracker server".to_string(),
            summary: "connect".to_string(),
        }
    }

    /// Create a decode error from a free-form message
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
            summary: "invalid response body".to_string(),
        }
    }

    /// Decode error from serde_json; the summary keeps only category and position
    pub fn decode_json(error: &serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
            summary: json_position(error),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Short, stable name of the error kind (used in event logs)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::Config(_) => "config",
            Self::NotLoggedIn(_) => "not_logged_in",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }

    /// Description safe to persist
    ///
    /// Never contains URLs, response bodies or values quoted from a payload.
    pub fn log_summary(&self) -> String {
        match self {
            Self::Transport { summary, .. } | Self::Decode { summary, .. } => summary.clone(),
            Self::Config(_) => "invalid configuration".to_string(),
            Self::NotLoggedIn(_) => "no session".to_string(),
            Self::Io(e) => format!("{:?}", e.kind()),
            Self::Json(e) => json_position(e),
        }
    }
}

fn json_position(error: &serde_json::Error) -> String {
    use serde_json::error::Category;

    let category = match error.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    };
    format!(
        "{} error at line {} column {}",
        category,
        error.line(),
        error.column()
    )
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let mut context = HashMap::new();
                context.insert("kind".to_string(), serde_json::json!(e.kind()));
                Self::fail_with_context(e.to_string(), context)
            }
        }
    }
}
