//! Helpers for Shopify global identifiers.
//!
//! Admin API objects are identified by gids of the form
//! `gid://shopify/<Type>/<numeric>`. Bulk result records can be consumed
//! either with the full gid or with just the trailing numeric id, while
//! mutation documents always need the full form. The helpers here convert
//! in both directions and pass already-converted values through unchanged.

/// How identifiers are rendered when parsing bulk result records.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::IdFormat;
///
/// let gid = "gid://shopify/ProductVariant/19047055687798";
/// assert_eq!(IdFormat::Numeric.apply(gid), "19047055687798");
/// assert_eq!(IdFormat::FullGid.apply(gid), gid);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdFormat {
    /// Keep the full `gid://shopify/...` identifier.
    FullGid,
    /// Reduce identifiers to their trailing numeric id.
    #[default]
    Numeric,
}

impl IdFormat {
    /// Renders one identifier according to this format.
    #[must_use]
    pub fn apply(self, gid: &str) -> String {
        match self {
            Self::FullGid => gid.to_string(),
            Self::Numeric => trailing_id(gid).to_string(),
        }
    }
}

/// Returns the trailing numeric id of a gid.
///
/// Splits on the last `/`. A value with no separator is returned whole,
/// so already-numeric ids pass through unchanged.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::bulk::trailing_id;
///
/// assert_eq!(trailing_id("gid://shopify/BulkOperation/4142422163590"), "4142422163590");
/// assert_eq!(trailing_id("4142422163590"), "4142422163590");
/// ```
#[must_use]
pub fn trailing_id(gid: &str) -> &str {
    gid.rsplit_once('/').map_or(gid, |(_, tail)| tail)
}

/// Builds a full product gid from a numeric id.
///
/// Values already in gid form are returned unchanged.
#[must_use]
pub fn product_gid(id: &str) -> String {
    qualify(id, "Product")
}

/// Builds a full product variant gid from a numeric id.
///
/// Values already in gid form are returned unchanged.
#[must_use]
pub fn variant_gid(id: &str) -> String {
    qualify(id, "ProductVariant")
}

/// Builds a full bulk operation gid from a numeric id.
///
/// Values already in gid form are returned unchanged.
#[must_use]
pub fn bulk_operation_gid(id: &str) -> String {
    qualify(id, "BulkOperation")
}

fn qualify(id: &str, type_name: &str) -> String {
    if id.starts_with("gid://") {
        id.to_string()
    } else {
        format!("gid://shopify/{type_name}/{id}")
    }
}
