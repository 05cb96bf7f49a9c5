//! HTTP client for Shopify Admin API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Admin GraphQL endpoint with automatic retry handling.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_response::HttpResponse;
use crate::config::StoreConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Content type for raw GraphQL document bodies.
///
/// The Admin endpoint accepts the document itself as the POST body under
/// this content type, with no JSON `{"query": ...}` wrapper.
const GRAPHQL_CONTENT_TYPE: &str = "application/graphql";

/// HTTP client for making requests to the Shopify Admin API.
///
/// The client handles:
/// - Base URI construction from the store domain or a host override
/// - Default headers including User-Agent and access token
/// - Automatic retry logic for 429 and 500 responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
/// use shopify_bulk::clients::HttpClient;
///
/// let config = StoreConfig::builder()
///     .store(StoreDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_token").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config);
/// let response = client.post_graphql("{ shop { name } }", 1).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., "/admin/api/2024-10").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given store configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The store configuration providing domain, access token,
    ///   API version, and transport settings
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
    /// use shopify_bulk::clients::HttpClient;
    ///
    /// let config = StoreConfig::builder()
    ///     .store(StoreDomain::new("my-store").unwrap())
    ///     .access_token(AccessToken::new("shpat_token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let base_path = format!("/admin/api/{}", config.api_version());

        // Determine base URI - use the host override if configured,
        // otherwise the store's myshopify.com domain
        let base_uri = config.host().map_or_else(
            || format!("https://{}", config.store().as_ref()),
            |host| host.base().to_string(),
        );

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Shopify Bulk Operations Library v{CLIENT_VERSION} | Rust {rust_version}"
        );

        // Build default headers
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            config.access_token().as_ref().to_string(),
        );

        // Add Host header when using a host override (proxy scenario)
        if config.host().is_some() {
            default_headers.insert("Host".to_string(), config.store().as_ref().to_string());
        }

        // Create reqwest client
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// POSTs a raw GraphQL document to the Admin endpoint.
    ///
    /// The document is sent as the request body with the
    /// `application/graphql` content type. Responses with 429 or 500
    /// status codes are retried up to `tries` attempts, honoring the
    /// `Retry-After` header on 429.
    ///
    /// # Arguments
    ///
    /// * `document` - The GraphQL document to execute
    /// * `tries` - Total number of attempts (1 = no retries)
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    /// - Max retries are exceeded (`MaxRetries`)
    pub async fn post_graphql(
        &self,
        document: &str,
        tries: u32,
    ) -> Result<HttpResponse, HttpError> {
        let tries = tries.max(1);
        let url = format!("{}{}/graphql.json", self.base_uri, self.base_path);

        tracing::debug!(url = %url, bytes = document.len(), "posting GraphQL document");

        // Retry loop
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = self.client.post(&url);
            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }
            req_builder = req_builder.header("Content-Type", GRAPHQL_CONTENT_TYPE);

            // Send request
            let res = req_builder.body(document.to_string()).send().await?;

            // Parse response
            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            // Parse body as JSON
            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // For 5xx errors, return raw body as string value
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body);

            // Log deprecation warning if present
            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    url,
                    reason
                );
            }

            // Check if response is OK
            if response.is_ok() {
                return Ok(response);
            }

            // Build error message from the response body
            let error_message = Self::serialize_error(&response);

            // Check if we should retry
            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            // Check if we've exhausted retries
            if attempt >= tries {
                if tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference: response.request_id().map(String::from),
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            // Calculate retry delay
            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(
                code,
                attempt,
                delay_secs = delay.as_secs_f64(),
                "retrying GraphQL request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // For 429: use Retry-After if present, otherwise fixed delay
        // For 500: always use fixed delay (ignore Retry-After)
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return std::time::Duration::from_secs_f64(retry_after);
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes an error response body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
        }
        if response.body.get("error").is_some() {
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}
