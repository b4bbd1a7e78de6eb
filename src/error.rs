//! Error types for the rent transaction client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Callers that need a stable, serializable view of a failure convert it
//! into an [`ApiError`].

use serde::Serialize;
use thiserror::Error;

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Validation error [{code}]: {message}")]
    Validation { code: String, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Transport failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ============================================================================
    // Domain Errors
    // ============================================================================
    #[error("Public data API error [{code}]: {message}")]
    Api {
        code: String,
        message: String,
        recoverable: bool,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Caller-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad caller input, rejected before any network call
    Validation,
    /// Network, timeout or non-2xx failure
    Transport,
    /// Body in no recognized format, or missing required structure
    MalformedResponse,
    /// Non-success result code reported by the upstream service
    Domain,
    /// Local configuration or I/O problem
    Config,
}

impl Error {
    /// Create a validation error
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a domain error from an upstream result code
    pub fn api(code: impl Into<String>, message: impl Into<String>, recoverable: bool) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
            recoverable,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is a transport failure eligible for retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// Which caller-facing category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Timeout { .. }
            | Error::RetriesExhausted { .. } => ErrorKind::Transport,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::Api { .. } => ErrorKind::Domain,
            Error::Config { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::Io(_)
            | Error::Other(_) => ErrorKind::Config,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &str {
        match self {
            Error::Validation { code, .. } | Error::Api { code, .. } => code,
            Error::MalformedResponse { .. } => "INVALID_RESPONSE_FORMAT",
            _ => match self.kind() {
                ErrorKind::Config => "CONFIG_ERROR",
                _ => "HTTP_ERROR",
            },
        }
    }

    /// Human-readable message without the code prefix
    pub fn message(&self) -> String {
        match self {
            Error::Validation { message, .. }
            | Error::Api { message, .. }
            | Error::MalformedResponse { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Serializable failure returned to callers of the query operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Failure category
    pub kind: ErrorKind,
    /// Machine-readable code
    #[serde(rename = "errorCode")]
    pub code: String,
    /// Human-readable message
    #[serde(rename = "errorMessage")]
    pub message: String,
}

impl From<&Error> for ApiError {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            code: err.code().to_string(),
            message: err.message(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
