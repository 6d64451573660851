//! Error types for the identity-management client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Network request failed: {message}")]
    NetworkFailure { message: String },

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Unsupported HTTP method: {method}")]
    InvalidMethod { method: String },

    // ============================================================================
    // Paginator Errors
    // ============================================================================
    #[error("Paginator received a bad response from the API")]
    PaginatorBadResponse,

    #[error("Paginator only supports GET requests, got {method}")]
    PaginatorUnsupportedMethod { method: String },

    #[error("Checkpoint pagination is not supported for endpoint '{path}'")]
    PaginatorUnsupportedEndpoint { path: String },

    #[error("Checkpoint pagination does not report a total; results cannot be counted")]
    PaginatorCannotCount,

    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a network failure error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported endpoint error
    pub fn unsupported_endpoint(path: impl Into<String>) -> Self {
        Self::PaginatorUnsupportedEndpoint { path: path.into() }
    }

    /// Check if this error was raised by the paginator
    pub fn is_paginator(&self) -> bool {
        matches!(
            self,
            Error::PaginatorBadResponse
                | Error::PaginatorUnsupportedMethod { .. }
                | Error::PaginatorUnsupportedEndpoint { .. }
                | Error::PaginatorCannotCount
        )
    }

    /// Check if this error came from the transport layer
    pub fn is_network(&self) -> bool {
        matches!(self, Error::NetworkFailure { .. })
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("domain");
        assert_eq!(err.to_string(), "Missing required config field: domain");

        let err = Error::network("connection refused");
        assert_eq!(
            err.to_string(),
            "Network request failed: connection refused"
        );

        let err = Error::unsupported_endpoint("clients");
        assert_eq!(
            err.to_string(),
            "Checkpoint pagination is not supported for endpoint 'clients'"
        );
    }

    #[test]
    fn test_is_paginator() {
        assert!(Error::PaginatorBadResponse.is_paginator());
        assert!(Error::PaginatorCannotCount.is_paginator());
        assert!(Error::PaginatorUnsupportedMethod {
            method: "POST".to_string()
        }
        .is_paginator());
        assert!(Error::unsupported_endpoint("users").is_paginator());

        assert!(!Error::network("boom").is_paginator());
        assert!(!Error::config("test").is_paginator());
    }

    #[test]
    fn test_is_network() {
        assert!(Error::network("timeout").is_network());
        assert!(!Error::PaginatorBadResponse.is_network());
    }
}
