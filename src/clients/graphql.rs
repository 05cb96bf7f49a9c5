//! GraphQL client for the Shopify Admin API.
//!
//! This module provides a higher-level GraphQL client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that executes documents
//! against Shopify's Admin API and decodes the response envelope.
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data
//! - `errors`: Any GraphQL execution errors (still HTTP 200)
//! - `extensions`: Query cost information
//!
//! The client separates these concerns: top-level `errors` become
//! [`GraphqlError::Api`], while `data` and the actual query cost are
//! returned in [`GraphqlResponse`].
//!
//! # Retry Behavior
//!
//! By default, requests are attempted the number of times configured via
//! [`StoreConfig`](crate::config::StoreConfig) (`http_tries`, default 1).
//! Retries apply to 429 (rate limited) and 500 (server error) responses.

use crate::clients::errors::GraphqlError;
use crate::clients::http_client::HttpClient;
use crate::config::{ApiVersion, StoreConfig};

/// A decoded GraphQL response.
///
/// Holds the `data` payload and the actual query cost reported in the
/// response extensions, when present. Top-level execution errors never
/// reach this type; they surface as [`GraphqlError::Api`].
#[derive(Clone, Debug)]
pub struct GraphqlResponse {
    /// The `data` field of the response, or `Value::Null` if absent.
    pub data: serde_json::Value,
    /// The actual query cost from `extensions.cost.actualQueryCost`.
    pub cost: Option<f64>,
}

/// GraphQL client for the Shopify Admin API.
///
/// Executes raw GraphQL documents with retry handling and decodes the
/// response envelope into [`GraphqlResponse`].
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
/// use shopify_bulk::clients::GraphqlClient;
///
/// let config = StoreConfig::builder()
///     .store(StoreDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_token").unwrap())
///     .build()
///     .unwrap();
///
/// let client = GraphqlClient::new(&config);
/// let response = client.run("{ shop { name } }").await?;
/// println!("Shop: {}", response.data["shop"]["name"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
    /// Attempts per request from the configuration.
    tries: u32,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for the given store configuration.
    ///
    /// The API version, retry count, and endpoint all come from the
    /// configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
    /// use shopify_bulk::clients::GraphqlClient;
    ///
    /// let config = StoreConfig::builder()
    ///     .store(StoreDomain::new("my-store").unwrap())
    ///     .access_token(AccessToken::new("shpat_token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GraphqlClient::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
            api_version: config.api_version().clone(),
            tries: config.http_tries(),
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Executes a GraphQL document against the Admin API.
    ///
    /// Uses the retry count from the configuration. See
    /// [`run_with_tries`](Self::run_with_tries) for a per-call override.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for transport-level errors and
    /// [`GraphqlError::Api`] when the response carries top-level
    /// execution errors.
    pub async fn run(&self, document: &str) -> Result<GraphqlResponse, GraphqlError> {
        self.run_with_tries(document, self.tries).await
    }

    /// Executes a GraphQL document with an explicit attempt count.
    ///
    /// # Arguments
    ///
    /// * `document` - The GraphQL document to execute
    /// * `tries` - Total number of attempts (1 = no retries)
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for transport-level errors and
    /// [`GraphqlError::Api`] when the response carries top-level
    /// execution errors.
    pub async fn run_with_tries(
        &self,
        document: &str,
        tries: u32,
    ) -> Result<GraphqlResponse, GraphqlError> {
        let response = self.http_client.post_graphql(document, tries).await?;
        let decoded = Self::decode_body(response.body)?;
        tracing::debug!(cost = ?decoded.cost, "GraphQL request complete");
        Ok(decoded)
    }

    /// Decodes a GraphQL response body into data and cost.
    ///
    /// A non-empty top-level `errors` value means the whole request was
    /// rejected, so it maps to [`GraphqlError::Api`] with one message per
    /// error entry. The API usually sends an array of error objects, but
    /// some failures (wrong path, bad token) arrive as a bare string.
    fn decode_body(body: serde_json::Value) -> Result<GraphqlResponse, GraphqlError> {
        match body.get("errors") {
            Some(serde_json::Value::Array(errors)) if !errors.is_empty() => {
                let messages = errors
                    .iter()
                    .map(|err| {
                        err.get("message")
                            .and_then(serde_json::Value::as_str)
                            .map_or_else(|| err.to_string(), String::from)
                    })
                    .collect();
                return Err(GraphqlError::Api { errors: messages });
            }
            Some(serde_json::Value::String(message)) => {
                return Err(GraphqlError::Api {
                    errors: vec![message.clone()],
                });
            }
            _ => {}
        }

        let cost = body
            .get("extensions")
            .and_then(|ext| ext.get("cost"))
            .and_then(|cost| cost.get("actualQueryCost"))
            .and_then(serde_json::Value::as_f64);

        let data = body
            .get("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Ok(GraphqlResponse { data, cost })
    }
}
