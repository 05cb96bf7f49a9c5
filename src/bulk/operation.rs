//! Bulk operation identity and lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bulk::gid;

/// Identifier of a server-side bulk operation.
///
/// Stores the trailing numeric id (for example `4142422163590`); the full
/// gid form used on the wire is available through [`gid`](Self::gid).
///
/// # Example
///
/// ```rust
/// use shopify_bulk::BulkOperationId;
///
/// let id = BulkOperationId::from_gid("gid://shopify/BulkOperation/4142422163590");
/// assert_eq!(id.as_str(), "4142422163590");
/// assert_eq!(id.gid(), "gid://shopify/BulkOperation/4142422163590");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkOperationId(String);

impl BulkOperationId {
    /// Creates an id from its numeric string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts the id from a full gid, keeping only the trailing numeric
    /// part. Bare numeric ids pass through unchanged.
    #[must_use]
    pub fn from_gid(gid_str: &str) -> Self {
        Self(gid::trailing_id(gid_str).to_string())
    }

    /// Returns the numeric id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the full gid form used on the wire.
    #[must_use]
    pub fn gid(&self) -> String {
        gid::bulk_operation_gid(&self.0)
    }
}

impl fmt::Display for BulkOperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a bulk operation as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkOperationStatus {
    Created,
    Running,
    Completed,
    Canceling,
    Canceled,
    Expired,
    Failed,
}

impl BulkOperationStatus {
    /// Returns `true` for states the server never leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Canceled | Self::Expired | Self::Failed
        )
    }
}

impl fmt::Display for BulkOperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "CREATED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Canceling => "CANCELING",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}
