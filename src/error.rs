// src/error.rs

//! Unified error handling for the client library.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Backend returned a non-success envelope or status code
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required-field validation failed before submission
    #[error("Validation error: missing fields [{}]", .missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Aggregation error for a single category
    #[error("Aggregation error for {category}: {message}")]
    Aggregate { category: String, message: String },

    /// Upstream proxy target failed before returning a response
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an API error from an HTTP status and server message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an aggregation error with category context.
    pub fn aggregate(category: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Aggregate {
            category: category.into(),
            message: message.to_string(),
        }
    }

    /// Create an upstream error for proxy forwarding failures.
    pub fn upstream(message: impl fmt::Display) -> Self {
        Self::Upstream(message.to_string())
    }
}
