//! Client for the asynchronous bulk-operation lifecycle.

use std::time::Duration;

use crate::clients::GraphqlClient;
use crate::config::StoreConfig;

/// Client driving the bulk-operation lifecycle: submit a document, poll
/// the resulting operation, then stream its result file.
///
/// Wraps a [`GraphqlClient`] for Admin API calls plus a separate plain
/// HTTP client for result downloads. Result URLs point at signed cloud
/// storage, which must never receive the store's access token, so the
/// download client carries no Shopify headers.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bulk::{
///     AccessToken, BulkOperationsClient, IdFormat, StoreConfig, StoreDomain,
/// };
///
/// let config = StoreConfig::builder()
///     .store(StoreDomain::new("my-store")?)
///     .access_token(AccessToken::new("shpat_...")?)
///     .build()?;
/// let client = BulkOperationsClient::new(&config);
///
/// let export = client.export_product_variants(IdFormat::Numeric).await?;
/// println!("fetched {} variants", export.records.len());
/// ```
///
/// # Thread Safety
///
/// `BulkOperationsClient` is `Send + Sync`; share it across tasks with
/// `Arc` if needed.
#[derive(Debug)]
pub struct BulkOperationsClient {
    graphql: GraphqlClient,
    download: reqwest::Client,
    poll_interval: Duration,
    max_poll_wait: Option<Duration>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BulkOperationsClient>();
};

impl BulkOperationsClient {
    /// Creates a bulk operations client for the given store configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP clients cannot be constructed, which
    /// only happens when the TLS backend fails to initialize.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let download = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            graphql: GraphqlClient::new(config),
            download,
            poll_interval: config.poll_interval(),
            max_poll_wait: config.max_poll_wait(),
        }
    }

    /// Returns the underlying GraphQL client.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Returns the configured interval between status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the configured cap on total polling time, if bounded.
    #[must_use]
    pub const fn max_poll_wait(&self) -> Option<Duration> {
        self.max_poll_wait
    }

    pub(crate) const fn download_client(&self) -> &reqwest::Client {
        &self.download
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, StoreDomain};

    fn test_config() -> StoreConfig {
        StoreConfig::builder()
            .store(StoreDomain::new("bulk-test-store").unwrap())
            .access_token(AccessToken::new("shpat_test_token").unwrap())
            .poll_interval(Duration::from_secs(5))
            .max_poll_wait(Duration::from_secs(300))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_copies_polling_settings_from_config() {
        let client = BulkOperationsClient::new(&test_config());

        assert_eq!(client.poll_interval(), Duration::from_secs(5));
        assert_eq!(client.max_poll_wait(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_max_poll_wait_defaults_to_unbounded() {
        let config = StoreConfig::builder()
            .store(StoreDomain::new("bulk-test-store").unwrap())
            .access_token(AccessToken::new("shpat_test_token").unwrap())
            .build()
            .unwrap();
        let client = BulkOperationsClient::new(&config);

        assert_eq!(client.max_poll_wait(), None);
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BulkOperationsClient>();
    }

    #[test]
    fn test_graphql_accessor_exposes_inner_client() {
        let client = BulkOperationsClient::new(&test_config());

        assert!(client.graphql().api_version().to_string().contains('-'));
    }
}
