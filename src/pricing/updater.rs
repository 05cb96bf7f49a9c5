//! Orchestration of a full price update run.
//!
//! A run exports every product variant through a bulk operation, folds
//! the records into per-product batches, then issues one
//! `productVariantsBulkUpdate` mutation per product. Failures are
//! isolated per batch: a product that cannot be quoted or updated is
//! recorded in the summary while the remaining products still run.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::bulk::{
    documents, group_by_product, BulkError, BulkOperationsClient, IdFormat, ProductBatch,
};
use crate::pricing::quote::{ExchangeRateSource, PricingError, PricingRule, RateWindow};

/// Errors arising during a price update run.
#[derive(Debug, Error)]
pub enum PriceUpdateError {
    /// A pricing collaborator failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The bulk export or a mutation failed.
    #[error(transparent)]
    Bulk(#[from] BulkError),
}

/// One product batch that could not be updated.
#[derive(Debug)]
pub struct BatchFailure {
    /// Parent product id of the failed batch.
    pub product_id: String,
    /// Number of variants the batch held.
    pub variants: usize,
    /// What went wrong.
    pub error: PriceUpdateError,
}

/// Accounting for one price update run.
#[derive(Debug)]
pub struct PriceUpdateSummary {
    /// Variants whose batch mutation was accepted.
    pub variants_updated: usize,
    /// Variants seen in the export.
    pub variants_total: usize,
    /// Total query cost across the export, mutations, and polls.
    pub query_cost: f64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Batches that failed, in stream order.
    pub failures: Vec<BatchFailure>,
}

impl PriceUpdateSummary {
    /// Returns `true` when every batch was applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reprices every exported variant with `rule` at the given conversion
/// rate.
///
/// The variant catalog is exported through a bulk operation, grouped
/// into per-product batches, and each batch is applied with a single
/// mutation. A batch that fails to quote or apply is recorded in the
/// summary's `failures` and the run continues with the next product.
///
/// # Errors
///
/// Returns an error only when the initial export fails; later failures
/// are per-batch and land in the summary.
pub async fn update_variant_prices(
    client: &BulkOperationsClient,
    rule: &dyn PricingRule,
    rate: f64,
) -> Result<PriceUpdateSummary, PriceUpdateError> {
    let started = Instant::now();

    let export = client.export_product_variants(IdFormat::Numeric).await?;
    let variants_total = export.records.len();
    let mut query_cost = export.cost;

    let batches = group_by_product(export.records);
    tracing::info!(
        variants = variants_total,
        products = batches.len(),
        rate,
        "starting price update"
    );

    let mut variants_updated = 0;
    let mut failures = Vec::new();
    for batch in batches {
        match update_batch(client, rule, rate, &batch).await {
            Ok(cost) => {
                variants_updated += batch.len();
                query_cost += cost;
            }
            Err(error) => {
                tracing::error!(
                    product_id = %batch.product_id,
                    variants = batch.len(),
                    %error,
                    "price update failed for product, continuing"
                );
                failures.push(BatchFailure {
                    product_id: batch.product_id.clone(),
                    variants: batch.len(),
                    error,
                });
            }
        }
    }

    let summary = PriceUpdateSummary {
        variants_updated,
        variants_total,
        query_cost,
        elapsed: started.elapsed(),
        failures,
    };
    tracing::info!(
        updated = summary.variants_updated,
        total = summary.variants_total,
        failed_products = summary.failures.len(),
        cost = summary.query_cost,
        elapsed_s = summary.elapsed.as_secs_f64(),
        "price update finished"
    );
    Ok(summary)
}

/// Quotes and applies one product batch, returning the query cost it
/// consumed.
async fn update_batch(
    client: &BulkOperationsClient,
    rule: &dyn PricingRule,
    rate: f64,
    batch: &ProductBatch,
) -> Result<f64, PriceUpdateError> {
    let mut variants = Vec::with_capacity(batch.len());
    for record in &batch.variants {
        let quote = rule.quote(&record.sku, rate)?;
        tracing::debug!(
            sku = %record.sku,
            price = quote.selling_price,
            detail = %quote.detail,
            "quoted variant"
        );
        variants.push((record.variant_id.clone(), quote.selling_price));
    }

    let document = documents::product_variants_bulk_update(&batch.product_id, &variants);
    let outcome = client.submit(&document).await?;
    let mut cost = outcome.cost().unwrap_or(0.0);

    // The mutation normally applies in the same call; poll only when the
    // server queued an operation instead.
    if let Some(id) = outcome.operation_id() {
        let polled = client.poll_operation(id).await?;
        cost += polled.cost.unwrap_or(0.0);
        if polled.error_code.is_some() {
            return Err(PriceUpdateError::Bulk(BulkError::OperationFailed {
                id: id.clone(),
                status: polled.status,
                error_code: polled.error_code,
            }));
        }
    }

    Ok(cost)
}

/// Resolves the conversion rate for the trailing week, then runs
/// [`update_variant_prices`] with it.
///
/// The rate used is the week's maximum for the `base` to `target` pair,
/// so prices do not dip on short-lived rate drops.
///
/// # Errors
///
/// Returns [`PriceUpdateError::Pricing`] when the rate cannot be
/// resolved, otherwise the same as [`update_variant_prices`].
pub async fn run_price_update(
    client: &BulkOperationsClient,
    rates: &dyn ExchangeRateSource,
    rule: &dyn PricingRule,
    base: &str,
    target: &str,
) -> Result<PriceUpdateSummary, PriceUpdateError> {
    let window = RateWindow::trailing_week();
    let rate = rates.max_rate(base, target, &window)?;
    tracing::info!(
        base,
        target,
        rate,
        window_start = %window.start,
        window_end = %window.end,
        "resolved exchange rate"
    );
    update_variant_prices(client, rule, rate).await
}
