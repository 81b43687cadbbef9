//! Error handling with context pattern
//!
//! Fetch-layer errors carry the URL they came from. Query strings are never
//! part of that context because the GNews credential travels in one.

use thiserror::Error;

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for news operations
#[derive(Error, Debug)]
pub enum Error {
    /// Arguments rejected by the operation's parameter table
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No operation with this name in the catalogue
    #[error("Unknown tool: {name}")]
    UnknownOperation { name: String },

    /// Network failure talking to a news source
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    /// Response body could not be parsed
    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    /// Non-success HTTP status from a news source
    #[error("{url} responded with HTTP {status}")]
    Upstream { url: String, status: u16 },

    /// The news API's daily quota is exhausted
    #[error("API daily quota reached. Please try again tomorrow.")]
    QuotaExceeded,

    /// Rate limited by the news source
    #[error("{}", rate_limited_message(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    /// Request cannot be served in the current mode or is malformed
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error in {context}: {source}")]
    Serialization {
        context: String,
        source: serde_json::Error,
    },

    /// Transport I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn rate_limited_message(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("Rate limited, retry after {secs} seconds"),
        None => "Rate limited by news source".to_string(),
    }
}

impl Error {
    /// Whether the error came from talking to the upstream news source
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. }
                | Error::Parse { .. }
                | Error::Upstream { .. }
                | Error::QuotaExceeded
                | Error::RateLimited { .. }
        )
    }
}

/// Argument validation failures.
///
/// When several parameters are invalid, the first one in declaration order is
/// reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Arguments must be a JSON object")]
    NotAnObject,

    #[error("Missing required parameter '{key}'")]
    MissingRequired { key: String },

    #[error("Parameter '{key}' must be of type {expected}")]
    InvalidType { key: String, expected: &'static str },

    #[error("Parameter '{key}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        key: String,
        actual: i64,
        min: i64,
        max: i64,
    },

    #[error("Parameter '{key}' has length {actual}, {}", length_bounds(.min, .max))]
    InvalidLength {
        key: String,
        actual: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("Parameter '{key}' must be one of [{}], got '{value}'", .allowed.join(", "))]
    InvalidEnum {
        key: String,
        value: String,
        allowed: Vec<String>,
    },
}

fn length_bounds(min: &Option<usize>, max: &Option<usize>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) if lo == hi => format!("expected exactly {lo}"),
        (Some(lo), Some(hi)) => format!("expected between {lo} and {hi}"),
        (Some(lo), None) => format!("expected at least {lo}"),
        (None, Some(hi)) => format!("expected at most {hi}"),
        (None, None) => "expected any length".to_string(),
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ErrorContext<T> for std::result::Result<T, reqwest::Error> {
    fn with_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Fetch {
            url: context.into(),
            source: e.without_url(),
        })
    }
}

impl<T> ErrorContext<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Serialization {
            context: context.into(),
            source: e,
        })
    }
}
