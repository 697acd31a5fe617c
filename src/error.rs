// src/error.rs

//! Unified error handling for the extraction engine.
//!
//! Soft failures (a page past the end, a comment service that refused both
//! queries) are not errors: they travel as [`crate::models::Paged::Error`].
//! Everything here aborts the current operation.

use std::fmt;

use thiserror::Error;

/// Result type alias for engine operations.
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

    /// Upstream answered, but not with a usable response
    #[error("Upstream error for {path}: {message}")]
    Upstream { path: String, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unrecognized status/sort/category value, rejected before fetching
    #[error("Invalid {kind}: '{value}'")]
    InvalidFilter { kind: &'static str, value: String },

    /// Empty or unusable search input
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A value the operation cannot proceed without was absent from the markup
    #[error("Extraction error for {context}: {message}")]
    Extraction { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid-filter error.
    pub fn invalid_filter(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilter {
            kind,
            value: value.into(),
        }
    }

    /// Create an upstream error for a request path.
    pub fn upstream(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Upstream {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error with context.
    pub fn extraction(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extraction {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error is a caller precondition failure rather than an
    /// upstream or internal fault.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidFilter { .. } | Self::InvalidQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(AppError::invalid_filter("status", "foo").is_precondition());
        assert!(AppError::InvalidQuery("empty".into()).is_precondition());
        assert!(!AppError::upstream("tim-truyen", "503").is_precondition());
    }

    #[test]
    fn test_display() {
        let err = AppError::invalid_filter("status", "paused");
        assert_eq!(err.to_string(), "Invalid status: 'paused'");
    }
}
