//! Configuration types for the bulk operations client.
//!
//! This module provides the core configuration types used to initialize
//! clients for API communication with Shopify.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`StoreConfig`]: The main configuration struct holding all client settings
//! - [`StoreConfigBuilder`]: A builder for constructing [`StoreConfig`] instances
//! - [`StoreDomain`]: A validated Shopify store domain
//! - [`AccessToken`]: A validated access token newtype with masked debug output
//! - [`HostUrl`]: A validated endpoint override URL
//! - [`ApiVersion`]: The Shopify API version to use
//!
//! All state is carried explicitly by value; there is no process-wide
//! configuration of any kind.
//!
//! # Example
//!
//! ```rust
//! use shopify_bulk::{StoreConfig, StoreDomain, AccessToken, ApiVersion};
//!
//! let config = StoreConfig::builder()
//!     .store(StoreDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, StoreDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;
use std::time::Duration;

/// Configuration for the bulk operations client.
///
/// This struct holds all configuration needed to talk to one store: the
/// store domain, the Admin API access token, the API version, and the
/// timing knobs for polling and transport retries.
///
/// # Thread Safety
///
/// `StoreConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
/// use std::time::Duration;
///
/// let config = StoreConfig::builder()
///     .store(StoreDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_token").unwrap())
///     .poll_interval(Duration::from_secs(5))
///     .max_poll_wait(Duration::from_secs(600))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.poll_interval(), Duration::from_secs(5));
/// ```
#[derive(Clone, Debug)]
pub struct StoreConfig {
    store: StoreDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    host: Option<HostUrl>,
    poll_interval: Duration,
    max_poll_wait: Option<Duration>,
    request_timeout: Duration,
    http_tries: u32,
    user_agent_prefix: Option<String>,
}

impl StoreConfig {
    /// Creates a new builder for constructing a `StoreConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken};
    ///
    /// let config = StoreConfig::builder()
    ///     .store(StoreDomain::new("my-store").unwrap())
    ///     .access_token(AccessToken::new("shpat_token").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Returns the store domain.
    #[must_use]
    pub const fn store(&self) -> &StoreDomain {
        &self.store
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the endpoint override, if configured.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the fixed interval between status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the maximum total time to poll one operation, if bounded.
    ///
    /// `None` means poll until the operation reaches a terminal condition,
    /// which matches Shopify's own guidance for bulk operations.
    #[must_use]
    pub const fn max_poll_wait(&self) -> Option<Duration> {
        self.max_poll_wait
    }

    /// Returns the per-request connect/read timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the number of attempts per HTTP request (1 = no retries).
    #[must_use]
    pub const fn http_tries(&self) -> u32 {
        self.http_tries
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify StoreConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreConfig>();
};

/// Builder for constructing [`StoreConfig`] instances.
///
/// This builder provides a fluent API for configuring the client. Required
/// fields are `store` and `access_token`. All other fields have sensible
/// defaults.
///
/// # Defaults
///
/// - `api_version`: Latest stable version
/// - `host`: `None` (requests go to `https://{store}.myshopify.com`)
/// - `poll_interval`: 10 seconds
/// - `max_poll_wait`: `None` (unbounded)
/// - `request_timeout`: 30 seconds
/// - `http_tries`: 1 (no retries)
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use shopify_bulk::{StoreConfig, StoreDomain, AccessToken, ApiVersion, HostUrl};
///
/// let config = StoreConfig::builder()
///     .store(StoreDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_token").unwrap())
///     .api_version(ApiVersion::V2024_10)
///     .host(HostUrl::new("http://localhost:3000").unwrap())
///     .http_tries(3)
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    store: Option<StoreDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    host: Option<HostUrl>,
    poll_interval: Option<Duration>,
    max_poll_wait: Option<Duration>,
    request_timeout: Option<Duration>,
    http_tries: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl StoreConfigBuilder {
    /// Default interval between status polls.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

    /// Default per-request connect/read timeout.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store domain (required).
    #[must_use]
    pub fn store(mut self, store: StoreDomain) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the Admin API access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets an endpoint override for all Admin API requests.
    ///
    /// When set, requests are sent to this base URL with a `Host` header
    /// naming the real store, which is the shape proxies expect. Test
    /// servers use this to stand in for Shopify.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the fixed interval between status polls.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Bounds the total time spent polling one operation.
    ///
    /// When the bound is exceeded the poll returns a timeout error instead
    /// of waiting further. Unset means unbounded polling.
    #[must_use]
    pub const fn max_poll_wait(mut self, max_wait: Duration) -> Self {
        self.max_poll_wait = Some(max_wait);
        self
    }

    /// Sets the per-request connect/read timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the number of attempts per HTTP request.
    ///
    /// Attempts beyond the first happen only for retryable statuses
    /// (429 and 500). Values below 1 are treated as 1.
    #[must_use]
    pub const fn http_tries(mut self, tries: u32) -> Self {
        self.http_tries = Some(tries);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`StoreConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `store` or
    /// `access_token` are not set, and [`ConfigError::ZeroPollInterval`] if
    /// a zero poll interval was configured.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let store = self
            .store
            .ok_or(ConfigError::MissingRequiredField { field: "store" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        let poll_interval = self.poll_interval.unwrap_or(Self::DEFAULT_POLL_INTERVAL);
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(StoreConfig {
            store,
            access_token,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            host: self.host,
            poll_interval,
            max_poll_wait: self.max_poll_wait,
            request_timeout: self
                .request_timeout
                .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT),
            http_tries: self.http_tries.unwrap_or(1).max(1),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_store() {
        let result = StoreConfigBuilder::new()
            .access_token(AccessToken::new("shpat_token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "store" })
        ));
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = StoreConfigBuilder::new()
            .store(StoreDomain::new("my-store").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = StoreConfig::builder()
            .store(StoreDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(
            config.poll_interval(),
            StoreConfigBuilder::DEFAULT_POLL_INTERVAL
        );
        assert!(config.max_poll_wait().is_none());
        assert_eq!(
            config.request_timeout(),
            StoreConfigBuilder::DEFAULT_REQUEST_TIMEOUT
        );
        assert_eq!(config.http_tries(), 1);
        assert!(config.host().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_poll_interval() {
        let result = StoreConfig::builder()
            .store(StoreDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_token").unwrap())
            .poll_interval(Duration::ZERO)
            .build();

        assert!(matches!(result, Err(ConfigError::ZeroPollInterval)));
    }

    #[test]
    fn test_builder_normalizes_zero_tries_to_one() {
        let config = StoreConfig::builder()
            .store(StoreDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_token").unwrap())
            .http_tries(0)
            .build()
            .unwrap();

        assert_eq!(config.http_tries(), 1);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreConfig>();
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = StoreConfig::builder()
            .store(StoreDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_token").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.store(), config.store());

        // Debug must not leak the token
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("StoreConfig"));
        assert!(!debug_str.contains("shpat_token"));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let host = HostUrl::new("http://localhost:3000").unwrap();

        let config = StoreConfig::builder()
            .store(StoreDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_token").unwrap())
            .api_version(ApiVersion::V2024_10)
            .host(host.clone())
            .poll_interval(Duration::from_millis(250))
            .max_poll_wait(Duration::from_secs(90))
            .request_timeout(Duration::from_secs(5))
            .http_tries(3)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2024_10);
        assert_eq!(config.host(), Some(&host));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.max_poll_wait(), Some(Duration::from_secs(90)));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.http_tries(), 3);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }
}
