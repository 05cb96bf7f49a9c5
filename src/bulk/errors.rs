//! Error types for the bulk-operation lifecycle.

use std::time::Duration;

use thiserror::Error;

use crate::bulk::operation::{BulkOperationId, BulkOperationStatus};
use crate::clients::GraphqlError;

/// Errors surfaced while submitting, polling, or fetching bulk operations.
///
/// Transport and GraphQL-level failures pass through as
/// [`Graphql`](Self::Graphql); the remaining variants describe
/// bulk-specific failure modes.
#[derive(Debug, Error)]
pub enum BulkError {
    /// Transport failure or GraphQL execution error.
    #[error(transparent)]
    Graphql(#[from] GraphqlError),

    /// The server refused the submitted document with user errors.
    #[error("Bulk request rejected: {}", .messages.join("; "))]
    Rejected {
        /// User error messages in response order.
        messages: Vec<String>,
    },

    /// The response decoded as JSON but matched no known envelope.
    #[error("Unexpected bulk response shape (keys: {})", .keys.join(", "))]
    UnexpectedShape {
        /// Top-level keys of the unrecognized payload.
        keys: Vec<String>,
    },

    /// Result download failed or was incomplete.
    #[error("Result download failed: {reason}")]
    Download { reason: String },

    /// The operation reached a terminal state without producing a result URL.
    #[error("Bulk operation {id} finished without a result URL")]
    OperationFailed {
        id: BulkOperationId,
        status: Option<BulkOperationStatus>,
        error_code: Option<String>,
    },

    /// Polling exceeded the configured maximum wait.
    #[error("Bulk operation {id} did not complete within {} seconds", .waited.as_secs())]
    Timeout {
        id: BulkOperationId,
        waited: Duration,
    },
}

/// Top-level keys of a JSON object, in map order. Non-objects yield an
/// empty list.
pub(crate) fn object_keys(value: &serde_json::Value) -> Vec<String> {
    value
        .as_object()
        .map_or_else(Vec::new, |map| map.keys().cloned().collect())
}
