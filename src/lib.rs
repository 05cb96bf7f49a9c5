//! # Shopify Bulk Operations for Rust
//!
//! An async client for the Shopify Admin GraphQL API's bulk-operation
//! lifecycle: submit a bulk query, poll it to completion, stream its
//! line-delimited result file, and drive catalog-wide follow-up
//! mutations.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`StoreConfig`] and [`StoreConfigBuilder`]
//! - Validated newtypes for the store domain and access token
//! - A raw-document GraphQL client with retry and rate-limit handling
//! - Bulk submission with envelope classification via [`BulkOperationsClient::submit`]
//! - Fixed-interval polling with an optional deadline via [`BulkOperationsClient::poll_operation`]
//! - Streaming result-file parsing into [`VariantRecord`]s, in memory or to disk
//! - Per-product batch grouping via [`group_by_product`]
//! - Exchange-rate-driven price updates via [`run_price_update`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_bulk::{AccessToken, ApiVersion, StoreConfig, StoreDomain};
//!
//! // Create configuration using the builder pattern
//! let config = StoreConfig::builder()
//!     .store(StoreDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_example_token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Exporting the Catalog
//!
//! The canonical export walks every product and its variants through one
//! bulk operation:
//!
//! ```rust,ignore
//! use shopify_bulk::{BulkOperationsClient, IdFormat};
//!
//! let client = BulkOperationsClient::new(&config);
//!
//! let export = client.export_product_variants(IdFormat::Numeric).await?;
//! println!(
//!     "{} variants across {:?} result objects, cost {}",
//!     export.records.len(),
//!     export.object_count,
//!     export.cost,
//! );
//! ```
//!
//! ## Submitting and Polling by Hand
//!
//! The composed steps are also available individually:
//!
//! ```rust,ignore
//! use shopify_bulk::bulk::documents;
//! use shopify_bulk::{IdFormat, SubmitOutcome};
//!
//! let outcome = client.run_query(documents::PRODUCT_VARIANTS_QUERY).await?;
//! if let SubmitOutcome::Queued { id, .. } = outcome {
//!     let polled = client.poll_operation(&id).await?;
//!     if let Some(url) = polled.url {
//!         let records = client.fetch_variants(&url, IdFormat::FullGid).await?;
//!         println!("fetched {} variants", records.len());
//!     }
//! }
//! ```
//!
//! ## Updating Prices
//!
//! Catalog-wide price updates plug a store-specific [`PricingRule`] and
//! [`ExchangeRateSource`] into the export:
//!
//! ```rust,ignore
//! use shopify_bulk::run_price_update;
//!
//! let summary = run_price_update(&client, &rates, &rule, "EUR", "USD").await?;
//! println!(
//!     "updated {}/{} variants, query cost {}",
//!     summary.variants_updated, summary.variants_total, summary.query_cost
//! );
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Streaming results**: Result files are parsed line by line, never buffered whole

pub mod bulk;
pub mod clients;
pub mod config;
pub mod error;
pub mod pricing;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, HostUrl, StoreConfig, StoreConfigBuilder, StoreDomain,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    GraphqlClient, GraphqlError, GraphqlResponse, HttpClient, HttpError, HttpResponse,
    HttpResponseError, MaxHttpRetriesExceededError,
};

// Re-export the bulk-operation lifecycle
pub use bulk::{
    group_by_product, BulkError, BulkOperationId, BulkOperationsClient, BulkOperationStatus,
    IdFormat, PollOptions, PollOutcome, ProductBatch, SubmitOutcome, VariantExport, VariantRecord,
};

// Re-export price updating
pub use pricing::{
    run_price_update, update_variant_prices, BatchFailure, ExchangeRateSource, PriceQuote,
    PriceUpdateError, PriceUpdateSummary, PricingError, PricingRule, RateWindow,
};
