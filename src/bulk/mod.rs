//! Asynchronous bulk-operation lifecycle for the Shopify Admin API.
//!
//! # Overview
//!
//! Large exports do not fit in a single GraphQL call. The Admin API
//! instead queues a *bulk operation*: the client submits a query wrapped
//! in a `bulkOperationRunQuery` mutation, polls the operation's node
//! until it finishes, then downloads a line-delimited JSON result file
//! from signed cloud storage. This module covers that whole lifecycle:
//!
//! * [`BulkOperationsClient::submit`] and
//!   [`BulkOperationsClient::run_query`] submit documents and classify
//!   the response into a [`SubmitOutcome`],
//! * [`BulkOperationsClient::poll_operation`] waits for the operation to
//!   finish and reports a [`PollOutcome`],
//! * [`BulkOperationsClient::fetch_variants`] and
//!   [`BulkOperationsClient::fetch_to_file`] stream the result file,
//! * [`group_by_product`] folds parsed records into per-product
//!   [`ProductBatch`]es for follow-up mutations,
//! * [`BulkOperationsClient::export_product_variants`] composes the
//!   submit, poll, and fetch steps for the canonical variants export.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bulk::{
//!     AccessToken, BulkOperationsClient, IdFormat, StoreConfig, StoreDomain,
//! };
//!
//! let config = StoreConfig::builder()
//!     .store(StoreDomain::new("my-store")?)
//!     .access_token(AccessToken::new("shpat_...")?)
//!     .build()?;
//! let client = BulkOperationsClient::new(&config);
//!
//! let export = client.export_product_variants(IdFormat::Numeric).await?;
//! for batch in shopify_bulk::group_by_product(export.records) {
//!     println!("product {} has {} variants", batch.product_id, batch.len());
//! }
//! ```

pub mod documents;

mod batch;
mod client;
mod errors;
mod gid;
mod operation;
mod poll;
mod results;
mod submit;

pub use batch::{group_by_product, ProductBatch};
pub use client::BulkOperationsClient;
pub use errors::BulkError;
pub use gid::{bulk_operation_gid, product_gid, trailing_id, variant_gid, IdFormat};
pub use operation::{BulkOperationId, BulkOperationStatus};
pub use poll::{PollOptions, PollOutcome};
pub use results::{VariantExport, VariantRecord};
pub use submit::SubmitOutcome;
