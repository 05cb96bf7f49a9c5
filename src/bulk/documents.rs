//! GraphQL document builders for the bulk-operation lifecycle.
//!
//! Documents are posted raw (`Content-Type: application/graphql`), so the
//! builders here produce complete, self-contained strings with all values
//! inlined. Identifier arguments accept either bare numeric ids or full
//! gids; they are qualified as needed.

use crate::bulk::gid;
use crate::bulk::operation::BulkOperationId;

/// Inner query exporting every product with its variants' id, title, and
/// sku. Submit it with
/// [`run_query`](crate::BulkOperationsClient::run_query).
pub const PRODUCT_VARIANTS_QUERY: &str =
    "{products {edges {node {id variants {edges {node {id title sku}}}}}}}";

/// Wraps an inner query in the `bulkOperationRunQuery` mutation envelope.
///
/// The inner query is inlined between GraphQL triple quotes, so it must
/// not itself contain `"""`.
#[must_use]
pub fn bulk_operation_run_query(inner_query: &str) -> String {
    format!(
        r#"mutation {{bulkOperationRunQuery(query: """{inner_query}""") {{bulkOperation {{id status}} userErrors {{field message}}}}}}"#
    )
}

/// Builds the status query for one bulk operation.
///
/// Selects `status`, `errorCode`, `objectCount`, and `url` from the
/// operation node.
#[must_use]
pub fn operation_status_query(id: &BulkOperationId) -> String {
    format!(
        r#"query {{ node(id: "{gid}") {{... on BulkOperation {{status errorCode objectCount url}}}}}}"#,
        gid = id.gid()
    )
}

/// Builds a `productVariantsBulkUpdate` mutation setting new prices on
/// variants of a single product.
///
/// Prices are rendered with two decimal places, as the API expects money
/// strings. Both `product_id` and the variant ids may be bare numeric ids
/// or full gids.
#[must_use]
pub fn product_variants_bulk_update(product_id: &str, variants: &[(String, f64)]) -> String {
    let entries: Vec<String> = variants
        .iter()
        .map(|(variant_id, price)| {
            format!(
                r#"{{id:"{}",price:"{:.2}"}}"#,
                gid::variant_gid(variant_id),
                price
            )
        })
        .collect();

    format!(
        r#"mutation {{productVariantsBulkUpdate(variants: [{entries}], productId: "{product}") {{userErrors {{code field message}}}}}}"#,
        entries = entries.join(","),
        product = gid::product_gid(product_id)
    )
}
