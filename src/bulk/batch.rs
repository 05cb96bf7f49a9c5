//! Grouping a flat variant stream into per-product batches.

use crate::bulk::results::VariantRecord;

/// An ordered run of variants sharing one parent product.
///
/// Built by [`group_by_product`]; every member's `product_id` equals the
/// batch's `product_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductBatch {
    /// Parent product identifier shared by every variant in the batch.
    pub product_id: String,
    /// The variants, in stream order.
    pub variants: Vec<VariantRecord>,
}

impl ProductBatch {
    /// Number of variants in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if the batch holds no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Partitions an ordered record stream into contiguous per-product
/// batches.
///
/// A new batch opens whenever the parent id changes, and the batch in
/// progress is flushed at end of input. The input is expected to arrive
/// already grouped by parent, as bulk result files are; if a parent
/// reappears later in the stream it opens a separate batch rather than
/// merging with the earlier one.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::{group_by_product, VariantRecord};
///
/// let record = |product: &str, variant: &str| VariantRecord {
///     variant_id: variant.to_string(),
///     title: "T".to_string(),
///     sku: format!("SKU-{variant}"),
///     product_id: product.to_string(),
/// };
///
/// let batches = group_by_product(vec![
///     record("1", "10"),
///     record("1", "11"),
///     record("2", "20"),
/// ]);
/// assert_eq!(batches.len(), 2);
/// assert_eq!(batches[0].len(), 2);
/// ```
#[must_use]
pub fn group_by_product<I>(records: I) -> Vec<ProductBatch>
where
    I: IntoIterator<Item = VariantRecord>,
{
    records.into_iter().fold(Vec::new(), |mut batches, record| {
        match batches.last_mut() {
            Some(open) if open.product_id == record.product_id => open.variants.push(record),
            _ => batches.push(ProductBatch {
                product_id: record.product_id.clone(),
                variants: vec![record],
            }),
        }
        batches
    })
}
