//! HTTP response type for the client layer.
//!
//! This module provides the [`HttpResponse`] type for parsing and
//! accessing API response data.

use std::collections::HashMap;

/// An HTTP response from the Shopify API.
///
/// Contains the response status code, headers, body, and the parsed
/// `Retry-After` value used by the retry loop.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    ///
    /// The `Retry-After` header is parsed into `retry_request_after` so
    /// the retry loop can honor server-provided backoff on 429 responses.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    ///
    /// When present, this indicates the API endpoint is deprecated and
    /// should be updated.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.headers
            .get("x-shopify-api-deprecated-reason")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
