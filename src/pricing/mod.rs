//! Catalog-wide price updates driven by exchange rates.
//!
//! # Overview
//!
//! The updater exports the store's full variant catalog through a bulk
//! operation, prices each sku with a caller-supplied [`PricingRule`],
//! and applies the new prices product by product with
//! `productVariantsBulkUpdate` mutations. Exchange rates come from a
//! caller-supplied [`ExchangeRateSource`], sampled over the trailing
//! week.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bulk::{run_price_update, BulkOperationsClient};
//!
//! let summary = run_price_update(&client, &rates, &rule, "EUR", "USD").await?;
//! println!(
//!     "updated {}/{} variants in {:.0?}",
//!     summary.variants_updated, summary.variants_total, summary.elapsed
//! );
//! for failure in &summary.failures {
//!     eprintln!("product {} skipped: {}", failure.product_id, failure.error);
//! }
//! ```

mod quote;
mod updater;

pub use quote::{
    ExchangeRateSource, PriceQuote, PricingError, PricingRule, RateWindow, MAX_SKU_LENGTH,
};
pub use updater::{
    run_price_update, update_variant_prices, BatchFailure, PriceUpdateError, PriceUpdateSummary,
};
