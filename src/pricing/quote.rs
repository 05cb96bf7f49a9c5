//! Pricing collaborators: quotes, rate windows, and the traits supplying
//! them.
//!
//! The price updater itself never decides what a variant should cost. It
//! asks an [`ExchangeRateSource`] for a conversion rate and a
//! [`PricingRule`] for a per-sku quote, so stores can plug in their own
//! catalog and rate provider. Both traits are synchronous and object
//! safe; implementations that call out over the network should resolve
//! their data up front.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest sku accepted by pricing rules.
pub const MAX_SKU_LENGTH: usize = 30;

/// Errors raised by pricing collaborators.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A currency code was not a 3-letter ISO code.
    #[error("Currency code '{code}' is not a 3-letter ISO code")]
    InvalidCurrency { code: String },

    /// A sku exceeded [`MAX_SKU_LENGTH`].
    #[error("Sku '{sku}' is longer than {max} characters")]
    SkuTooLong { sku: String, max: usize },

    /// No exchange rate could be resolved for the requested pair.
    #[error("No exchange rate for {base}->{target}: {detail}")]
    RateUnavailable {
        base: String,
        target: String,
        detail: String,
    },

    /// The rule could not price a sku.
    #[error("Could not price sku '{sku}': {detail}")]
    QuoteFailed { sku: String, detail: String },
}

/// A priced variant, as produced by a [`PricingRule`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The sku the quote is for.
    pub sku: String,
    /// New selling price in the target currency.
    pub selling_price: f64,
    /// Price in the source currency the quote was derived from.
    pub source_price: f64,
    /// Human-readable description of the priced product.
    pub description: String,
    /// How the price was derived, for operator review.
    pub detail: String,
}

/// Closed date range over which an exchange rate is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateWindow {
    /// First day of the window, inclusive.
    pub start: NaiveDate,
    /// Last day of the window, inclusive.
    pub end: NaiveDate,
}

impl RateWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The trailing week ending yesterday: eight days ago through one day
    /// ago, in local time.
    ///
    /// Rate providers publish with a day's delay, so the window never
    /// includes today.
    #[must_use]
    pub fn trailing_week() -> Self {
        let today = Local::now().date_naive();
        Self {
            start: today - Days::new(8),
            end: today - Days::new(1),
        }
    }
}

/// Source of currency conversion rates.
///
/// `max_rate` returns the highest rate observed for the pair across the
/// window. Pricing with the weekly maximum keeps selling prices from
/// dipping on short-lived rate drops.
pub trait ExchangeRateSource {
    /// Highest `base` to `target` conversion rate within `window`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidCurrency`] for malformed codes and
    /// [`PricingError::RateUnavailable`] when the pair cannot be
    /// resolved.
    fn max_rate(&self, base: &str, target: &str, window: &RateWindow)
        -> Result<f64, PricingError>;
}

/// Per-sku pricing policy.
pub trait PricingRule {
    /// Produces the quote for one sku at the given conversion rate.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::SkuTooLong`] for oversized skus and
    /// [`PricingError::QuoteFailed`] when the sku cannot be priced.
    fn quote(&self, sku: &str, rate: f64) -> Result<PriceQuote, PricingError>;
}
