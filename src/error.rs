//! Error types for client configuration.
//!
//! This module contains error types used when constructing and validating
//! configuration values.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use shopify_bulk::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Store domain is invalid.
    #[error("Invalid store domain '{domain}'. Expected format: 'store-name' or 'store-name.myshopify.com'.")]
    InvalidStoreDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-10') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Poll interval must be non-zero.
    #[error("Poll interval cannot be zero. Bulk operation status is only refreshed between waits.")]
    ZeroPollInterval,
}
