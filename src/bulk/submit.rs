//! Submitting bulk documents and classifying the response envelope.
//!
//! A submitted document lands in one of three envelopes: an asynchronous
//! one (`bulkOperationRunQuery` or `bulkOperationRunMutation`) that
//! queues a server-side operation, a direct mutation envelope
//! (`productVariantsBulkUpdate`) that completes in the same call, or
//! something unrecognized. Classification is driven by which envelope key
//! is present, never by probing optional fields.

use serde::Deserialize;

use crate::bulk::client::BulkOperationsClient;
use crate::bulk::documents;
use crate::bulk::errors::{object_keys, BulkError};
use crate::bulk::operation::{BulkOperationId, BulkOperationStatus};

/// Result of submitting a bulk document.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The server queued an asynchronous operation to poll.
    Queued {
        id: BulkOperationId,
        /// Actual query cost reported for the submit call.
        cost: Option<f64>,
    },
    /// A direct mutation completed in this call; there is nothing to poll.
    Immediate {
        /// Actual query cost reported for the submit call.
        cost: Option<f64>,
    },
}

impl SubmitOutcome {
    /// The queued operation id, if the submission was asynchronous.
    #[must_use]
    pub const fn operation_id(&self) -> Option<&BulkOperationId> {
        match self {
            Self::Queued { id, .. } => Some(id),
            Self::Immediate { .. } => None,
        }
    }

    /// Returns `true` when the document completed without queueing an
    /// operation.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate { .. })
    }

    /// Actual query cost reported for the submit call, when present.
    #[must_use]
    pub const fn cost(&self) -> Option<f64> {
        match self {
            Self::Queued { cost, .. } | Self::Immediate { cost } => *cost,
        }
    }
}

#[derive(Deserialize)]
struct AsyncEnvelope {
    #[serde(rename = "bulkOperation")]
    bulk_operation: Option<OperationHandle>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
struct OperationHandle {
    id: String,
    #[serde(default)]
    status: Option<BulkOperationStatus>,
}

#[derive(Deserialize)]
struct DirectEnvelope {
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
struct UserError {
    message: String,
}

impl UserError {
    fn into_messages(errors: Vec<Self>) -> Vec<String> {
        errors.into_iter().map(|error| error.message).collect()
    }
}

impl BulkOperationsClient {
    /// Submits a complete GraphQL document and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::Graphql`] on transport or GraphQL execution
    /// failure, [`BulkError::Rejected`] when the server answers with user
    /// errors and no operation, and [`BulkError::UnexpectedShape`] when
    /// the response matches no known envelope.
    pub async fn submit(&self, document: &str) -> Result<SubmitOutcome, BulkError> {
        let response = self.graphql().run(document).await?;
        Self::decode_submit(&response.data, response.cost)
    }

    /// Wraps an inner query in the `bulkOperationRunQuery` envelope and
    /// submits it.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub async fn run_query(&self, inner_query: &str) -> Result<SubmitOutcome, BulkError> {
        self.submit(&documents::bulk_operation_run_query(inner_query))
            .await
    }

    fn decode_submit(
        data: &serde_json::Value,
        cost: Option<f64>,
    ) -> Result<SubmitOutcome, BulkError> {
        if let Some(envelope) = data.get("bulkOperationRunQuery") {
            return Self::decode_async_envelope("bulkOperationRunQuery", envelope, cost);
        }
        if let Some(envelope) = data.get("bulkOperationRunMutation") {
            return Self::decode_async_envelope("bulkOperationRunMutation", envelope, cost);
        }
        if let Some(envelope) = data.get("productVariantsBulkUpdate") {
            return Self::decode_direct_envelope("productVariantsBulkUpdate", envelope, cost);
        }

        tracing::error!(payload = %data, "bulk submit response matched no known envelope");
        Err(BulkError::UnexpectedShape {
            keys: object_keys(data),
        })
    }

    fn decode_async_envelope(
        envelope_key: &str,
        envelope: &serde_json::Value,
        cost: Option<f64>,
    ) -> Result<SubmitOutcome, BulkError> {
        let decoded: AsyncEnvelope = serde_json::from_value(envelope.clone()).map_err(|_| {
            tracing::error!(envelope = envelope_key, payload = %envelope, "malformed bulk envelope");
            BulkError::UnexpectedShape {
                keys: object_keys(envelope),
            }
        })?;

        match decoded.bulk_operation {
            Some(handle) => {
                // The operation was queued; any user errors alongside it
                // are advisory.
                for error in &decoded.user_errors {
                    tracing::warn!(
                        envelope = envelope_key,
                        message = %error.message,
                        "user error on accepted bulk submission"
                    );
                }
                let id = BulkOperationId::from_gid(&handle.id);
                tracing::debug!(
                    %id,
                    status = ?handle.status,
                    envelope = envelope_key,
                    "bulk operation queued"
                );
                Ok(SubmitOutcome::Queued { id, cost })
            }
            None => {
                let messages = UserError::into_messages(decoded.user_errors);
                for message in &messages {
                    tracing::error!(envelope = envelope_key, %message, "bulk submission rejected");
                }
                Err(BulkError::Rejected { messages })
            }
        }
    }

    fn decode_direct_envelope(
        envelope_key: &str,
        envelope: &serde_json::Value,
        cost: Option<f64>,
    ) -> Result<SubmitOutcome, BulkError> {
        let decoded: DirectEnvelope = serde_json::from_value(envelope.clone()).map_err(|_| {
            tracing::error!(envelope = envelope_key, payload = %envelope, "malformed bulk envelope");
            BulkError::UnexpectedShape {
                keys: object_keys(envelope),
            }
        })?;

        if decoded.user_errors.is_empty() {
            tracing::debug!(
                envelope = envelope_key,
                "direct mutation applied, no operation to poll"
            );
            Ok(SubmitOutcome::Immediate { cost })
        } else {
            let messages = UserError::into_messages(decoded.user_errors);
            for message in &messages {
                tracing::error!(envelope = envelope_key, %message, "direct mutation rejected");
            }
            Err(BulkError::Rejected { messages })
        }
    }
}
