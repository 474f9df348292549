//! Error types for Taskora
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Taskora operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session handling, API calls, and repository
/// operations.
#[derive(Error, Debug)]
pub enum TaskoraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server-rejected API request (non-2xx response)
    ///
    /// `status` carries the HTTP status code; `message` is extracted
    /// best-effort from a JSON `message` field in the error body, and
    /// `payload` keeps the parsed body when one was present.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code of the rejected response
        status: u16,
        /// Human-readable message (from the body, or synthesized)
        message: String,
        /// Parsed error body, when the server sent one
        payload: Option<serde_json::Value>,
    },

    /// Transport-level failure: the request produced no HTTP response.
    ///
    /// Distinguishable from [`TaskoraError::Api`] by carrying no status
    /// (conventionally status zero in the original wire contract).
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Session/auth-related errors
    #[error("Session error: {0}")]
    Session(String),

    /// Repository errors (unknown kind, composition failures)
    #[error("Repository error: {0}")]
    Repository(String),

    /// Task not found by identifier
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Local slot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TaskoraError {
    /// HTTP status associated with this error, if any.
    ///
    /// [`TaskoraError::Unavailable`] reports zero, matching the wire
    /// convention for "no response received".
    pub fn status(&self) -> Option<u16> {
        match self {
            TaskoraError::Api { status, .. } => Some(*status),
            TaskoraError::Unavailable(_) => Some(0),
            _ => None,
        }
    }
}

/// Result type alias for Taskora operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
