//! Configuration error types for the TestRail API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid settings are rejected before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use testrail_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while building, loading, or applying configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL cannot be empty.
    #[error("Base URL cannot be empty. Please provide the address of your TestRail instance.")]
    EmptyBaseUrl,

    /// Base URL is not an http(s) URL.
    #[error("Invalid base URL '{url}'. Expected an http:// or https:// URL (e.g., 'https://example.testrail.io').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Project id cannot be empty.
    #[error("Project id cannot be empty. Please provide the id of the TestRail project.")]
    EmptyProjectId,

    /// Username cannot be empty.
    #[error("Username cannot be empty.")]
    EmptyUsername,

    /// API key or password cannot be empty.
    #[error("API key or password cannot be empty.")]
    EmptyApiSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The configuration sources could not be read or extracted.
    #[error("Failed to load configuration: {message}")]
    Load {
        /// Description of the underlying failure.
        message: String,
    },

    /// The logging subscriber could not be installed.
    #[error("Failed to initialize logging: {reason}")]
    LoggingInit {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load {
            message: err.to_string(),
        }
    }
}
