//! HTTP and GraphQL client types for Shopify Admin API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Shopify Admin API. It handles response processing,
//! retry logic, and GraphQL envelope decoding.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpResponse`]: A parsed response from the API
//! - [`GraphqlClient`]: Higher-level GraphQL client (Admin API)
//! - [`GraphqlResponse`]: Decoded GraphQL data plus query cost
//! - [`HttpError`]: Transport-level error types
//! - [`GraphqlError`]: Transport plus GraphQL execution errors
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
//! use shopify_bulk::clients::GraphqlClient;
//!
//! let config = StoreConfig::builder()
//!     .store(StoreDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = GraphqlClient::new(&config);
//! let response = client.run("{ shop { name } }").await?;
//! println!("Shop name: {}", response.data["shop"]["name"]);
//! ```
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default number of tries is 1, meaning no automatic retries.
//! Configure via `StoreConfig::builder().http_tries(n)` to enable retries.

mod errors;
mod graphql;
mod http_client;
mod http_response;

pub use errors::{GraphqlError, HttpError, HttpResponseError, MaxHttpRetriesExceededError};
pub use graphql::{GraphqlClient, GraphqlResponse};
pub use http_client::{HttpClient, CLIENT_VERSION, RETRY_WAIT_TIME};
pub use http_response::HttpResponse;
