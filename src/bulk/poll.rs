//! Polling a bulk operation until it finishes.
//!
//! The loop queries the operation node at a fixed interval and stops on
//! the first of: a result URL, a server-reported error code, a node with
//! nothing to wait for, or the optional deadline. The first response is
//! always inspected before any sleep, so ids that never had a
//! server-side operation (direct mutations) return immediately.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::bulk::client::BulkOperationsClient;
use crate::bulk::documents;
use crate::bulk::errors::{object_keys, BulkError};
use crate::bulk::operation::{BulkOperationId, BulkOperationStatus};
use crate::config::StoreConfigBuilder;

/// Options controlling one poll loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOptions {
    /// Fixed interval between status queries.
    pub interval: Duration,
    /// Cap on total wait before giving up with
    /// [`BulkError::Timeout`], unbounded if `None`.
    pub max_wait: Option<Duration>,
}

impl PollOptions {
    /// Creates options with the given interval and no maximum wait.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_wait: None,
        }
    }

    /// Bounds the total wait.
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(StoreConfigBuilder::DEFAULT_POLL_INTERVAL)
    }
}

/// Final observation of one polled operation.
///
/// `url` is present only for an operation that completed with results.
/// An operation that ended in failure reports `error_code` and no URL,
/// never both. A poll against an id with no server-side operation
/// reports neither status nor URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollOutcome {
    /// Last status reported by the server, if any.
    pub status: Option<BulkOperationStatus>,
    /// Error code for operations that ended in failure.
    pub error_code: Option<String>,
    /// Number of objects in the result set, when reported.
    pub object_count: Option<u64>,
    /// Signed download URL for the result set.
    pub url: Option<String>,
    /// Actual query cost of the final status response.
    pub cost: Option<f64>,
}

impl PollOutcome {
    /// Returns `true` when the operation produced a result URL.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.url.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
struct NodeStatus {
    #[serde(default)]
    status: Option<BulkOperationStatus>,
    #[serde(rename = "errorCode", default)]
    error_code: Option<String>,
    #[serde(
        rename = "objectCount",
        default,
        deserialize_with = "object_count_from_any"
    )]
    object_count: Option<u64>,
    #[serde(default)]
    url: Option<String>,
}

/// `objectCount` is an UnsignedInt64, which the API serializes as a JSON
/// string. Accept both string and number forms; anything unparseable
/// decodes as absent.
fn object_count_from_any<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(count)) => Some(count),
        Some(Raw::Text(text)) => text.parse().ok(),
        None => None,
    })
}

impl BulkOperationsClient {
    /// Polls an operation with the intervals configured on this client.
    ///
    /// # Errors
    ///
    /// Same as [`poll_operation_with`](Self::poll_operation_with).
    pub async fn poll_operation(&self, id: &BulkOperationId) -> Result<PollOutcome, BulkError> {
        let mut options = PollOptions::new(self.poll_interval());
        options.max_wait = self.max_poll_wait();
        self.poll_operation_with(id, &options).await
    }

    /// Polls an operation at a fixed interval until it finishes.
    ///
    /// Stops without sleeping when the first response shows a result URL,
    /// an error code, or no operation to wait for. An operation that
    /// ended in failure yields an outcome with `error_code` set and no
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::Graphql`] on transport or GraphQL execution
    /// failure, [`BulkError::UnexpectedShape`] when the operation node
    /// does not decode, and [`BulkError::Timeout`] when `max_wait`
    /// elapses before the operation finishes.
    pub async fn poll_operation_with(
        &self,
        id: &BulkOperationId,
        options: &PollOptions,
    ) -> Result<PollOutcome, BulkError> {
        let document = documents::operation_status_query(id);
        let started = Instant::now();

        loop {
            let response = self.graphql().run(&document).await?;
            let node = Self::decode_node(&response.data)?;

            if let Some(error_code) = node.error_code {
                tracing::error!(
                    %id,
                    error_code,
                    status = ?node.status,
                    "bulk operation ended with an error"
                );
                return Ok(PollOutcome {
                    status: node.status,
                    error_code: Some(error_code),
                    object_count: node.object_count,
                    url: None,
                    cost: response.cost,
                });
            }

            if let Some(url) = node.url {
                tracing::info!(
                    %id,
                    status = ?node.status,
                    object_count = ?node.object_count,
                    "bulk operation finished"
                );
                return Ok(PollOutcome {
                    status: node.status,
                    error_code: None,
                    object_count: node.object_count,
                    url: Some(url),
                    cost: response.cost,
                });
            }

            if node.status.is_none() {
                // No operation node, or a node with nothing to wait for.
                // Direct mutations land here on their first poll.
                tracing::debug!(%id, "no operation in progress, nothing to poll");
                return Ok(PollOutcome {
                    status: None,
                    error_code: None,
                    object_count: node.object_count,
                    url: None,
                    cost: response.cost,
                });
            }

            if let Some(max_wait) = options.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    return Err(BulkError::Timeout {
                        id: id.clone(),
                        waited,
                    });
                }
            }

            tracing::info!(
                %id,
                status = ?node.status,
                wait_s = options.interval.as_secs_f64(),
                "bulk operation still running, waiting"
            );
            tokio::time::sleep(options.interval).await;
        }
    }

    fn decode_node(data: &serde_json::Value) -> Result<NodeStatus, BulkError> {
        match data.get("node") {
            None | Some(serde_json::Value::Null) => Ok(NodeStatus::default()),
            Some(node) => serde_json::from_value(node.clone()).map_err(|_| {
                tracing::error!(payload = %node, "malformed bulk operation node");
                BulkError::UnexpectedShape {
                    keys: object_keys(node),
                }
            }),
        }
    }
}
