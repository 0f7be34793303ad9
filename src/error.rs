//! Error types for the Fujitsu console exporter.
//!
//! This module defines typed errors for each stage of the scrape pipeline,
//! so a failure can be scoped to the metric family it came from and logged
//! with the right severity.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Console communication errors
    #[error("console error")]
    Console(#[from] ConsoleError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while talking to the management console.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered 401 without a usable Digest challenge
    #[error("digest challenge missing or incomplete: {0}")]
    AuthChallengeMissing(String),

    /// The server offered a Digest variant we do not implement
    #[error("unsupported digest challenge: {0}")]
    UnsupportedChallenge(String),

    /// The final response was not 200 OK
    #[error("request failed with status {status}: {body}")]
    Fetch { status: u16, body: String },
}

/// HTML extraction errors. Every variant names the selector path involved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Selector syntax could not be compiled
    #[error("invalid selector '{path}': {message}")]
    InvalidSelector { path: String, message: String },

    /// No node matched the selector
    #[error("element not found: {path}")]
    ElementNotFound { path: String },

    /// The matched text is not a number
    #[error("failed to parse number from '{text}' at {path}")]
    NumberParse { path: String, text: String },

    /// A table reported a row count outside the plausible range
    #[error("implausible row count {count} under {path}")]
    ImplausibleRowCount { path: String, count: usize },
}

/// Metric mapping errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Label values do not match the definition's label names
    #[error("metric '{metric}' expects {expected} label values, got {actual}")]
    LabelArityMismatch {
        metric: String,
        expected: usize,
        actual: usize,
    },
}

/// Metric collection errors, scoped to a single metric family.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Fetching the page failed
    #[error("failed to fetch page")]
    Fetch(#[from] ConsoleError),

    /// The page did not have the expected structure
    #[error("failed to extract value")]
    Extraction(#[from] ExtractionError),

    /// Samples could not be built from the extracted values
    #[error("failed to map metric")]
    Mapping(#[from] MetricError),
}

/// Prometheus exposition errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Registering or encoding a collector failed
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// The encoder produced non UTF-8 output
    #[error("metrics output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Longest response body kept in a [`ConsoleError::Fetch`].
const BODY_SNIPPET_LEN: usize = 256;

impl ConsoleError {
    /// Creates a fetch error from a final status and response body.
    ///
    /// The body is cut down to a short snippet on a character boundary.
    pub fn fetch(status: reqwest::StatusCode, body: &str) -> Self {
        let body = match body.char_indices().nth(BODY_SNIPPET_LEN) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::Fetch {
            status: status.as_u16(),
            body,
        }
    }

    /// Whether the failure may go away on its own and is worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Timeout(_) => true,
            Self::Fetch { status, .. } => *status >= 500,
            Self::AuthChallengeMissing(_) | Self::UnsupportedChallenge(_) => false,
        }
    }
}

impl ExtractionError {
    /// Creates an element not found error.
    pub fn element_not_found(path: impl Into<String>) -> Self {
        Self::ElementNotFound { path: path.into() }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates a number parse error.
    pub fn number_parse(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::NumberParse {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Selector path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidSelector { path, .. }
            | Self::ElementNotFound { path }
            | Self::NumberParse { path, .. }
            | Self::ImplausibleRowCount { path, .. } => path,
        }
    }
}

impl CollectorError {
    /// Whether the error points at a configuration or programming defect
    /// rather than a flaky console.
    pub fn is_defect(&self) -> bool {
        match self {
            Self::Fetch(ConsoleError::AuthChallengeMissing(_))
            | Self::Fetch(ConsoleError::UnsupportedChallenge(_))
            | Self::Fetch(ConsoleError::Fetch { status: 401, .. })
            | Self::Mapping(_) => true,
            Self::Fetch(_) | Self::Extraction(_) => false,
        }
    }
}
