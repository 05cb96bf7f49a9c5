//! HTTP and GraphQL error types for the client layer.
//!
//! This module contains error types for transport operations, including
//! response errors, retry exhaustion, and GraphQL-level rejections.
//!
//! # Error Handling
//!
//! The client uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`HttpError`]: Unified error type encompassing all transport errors
//! - [`GraphqlError`]: Transport errors plus GraphQL execution errors
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bulk::clients::{GraphqlClient, GraphqlError, HttpError};
//!
//! match client.run(document).await {
//!     Ok(response) => println!("Cost: {:?}", response.cost),
//!     Err(GraphqlError::Api { errors }) => {
//!         println!("Query rejected: {}", errors.join("; "));
//!     }
//!     Err(GraphqlError::Http(HttpError::Response(e))) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(GraphqlError::Http(e)) => {
//!         println!("Transport error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// This error includes the status code and a serialized error message in
/// JSON format built from the response body.
///
/// # JSON Message Format
///
/// The message field contains JSON with any of these fields from the response:
/// - `errors`: Array of error messages
/// - `error`: Single error message
/// - `error_description`: Description of the error
/// - `error_reference`: Debugging reference including X-Request-Id
///
/// # Example
///
/// ```rust
/// use shopify_bulk::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"error":"Not found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// println!("Status {}: {}", error.code, error.message);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// This error is raised when a request continues to fail with 429 or 500
/// responses after all configured retry attempts have been made.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::clients::MaxHttpRetriesExceededError;
///
/// let error = MaxHttpRetriesExceededError {
///     code: 429,
///     tries: 3,
///     message: r#"{"error":"Rate limited"}"#.to_string(),
///     error_reference: None,
/// };
///
/// println!("{}", error); // "Exceeded maximum retry count of 3. Last message: ..."
/// ```
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Unified error type for all transport-level errors.
///
/// This enum provides a single error type for HTTP operations, making it
/// easier to handle errors at API boundaries. Use pattern matching to
/// handle specific error types.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::HttpError;
///
/// let result = client.post_graphql(&document).await;
/// match result {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* handle API error */ }
///     Err(HttpError::MaxRetries(e)) => { /* handle retry exhaustion */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error type for GraphQL requests.
///
/// Covers both transport failures and requests the GraphQL layer itself
/// rejected with a top-level `errors` array. A response carrying top-level
/// errors has no usable `data`, so it surfaces here rather than as a
/// partial success.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::GraphqlError;
///
/// match client.run(document).await {
///     Ok(response) => { /* inspect response.data */ }
///     Err(GraphqlError::Api { errors }) => {
///         eprintln!("rejected: {}", errors.join("; "));
///     }
///     Err(GraphqlError::Http(e)) => eprintln!("transport: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Transport-level failure (HTTP status, retries, network).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The GraphQL layer returned top-level execution errors.
    #[error("GraphQL errors: {}", .errors.join("; "))]
    Api {
        /// Messages from the top-level `errors` array.
        errors: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_message_is_serialized_body() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"error":"Not Found"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"error":"Not Found"}"#);
    }

    #[test]
    fn test_http_response_error_includes_request_id() {
        let error = HttpResponseError {
            code: 500,
            message: r#"{"error":"Internal Server Error","error_reference":"If you report this error, please include this id: abc-123."}"#.to_string(),
            error_reference: Some("abc-123".to_string()),
        };
        assert_eq!(error.error_reference, Some("abc-123".to_string()));
        assert!(error.to_string().contains("abc-123"));
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"error":"Rate limited"}"#.to_string(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains("3"));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_graphql_api_error_joins_messages() {
        let error = GraphqlError::Api {
            errors: vec![
                "Field 'foo' doesn't exist".to_string(),
                "Field 'bar' doesn't exist".to_string(),
            ],
        };
        assert_eq!(
            error.to_string(),
            "GraphQL errors: Field 'foo' doesn't exist; Field 'bar' doesn't exist"
        );
    }

    #[test]
    fn test_graphql_error_wraps_http_error() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 503,
            message: r#"{"error":"Service Unavailable"}"#.to_string(),
            error_reference: None,
        });
        let error = GraphqlError::from(http_error);
        assert!(matches!(error, GraphqlError::Http(HttpError::Response(_))));
        assert_eq!(error.to_string(), r#"{"error":"Service Unavailable"}"#);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let http_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            error_reference: None,
        };
        let _ = http_error;

        let max_retries_error: &dyn std::error::Error = &MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: "test".to_string(),
            error_reference: None,
        };
        let _ = max_retries_error;

        let graphql_error: &dyn std::error::Error = &GraphqlError::Api {
            errors: vec!["test".to_string()],
        };
        let _ = graphql_error;
    }
}
