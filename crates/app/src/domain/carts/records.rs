//! Cart Records

use gemstore::basket::Basket;
use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{auth::UserUuid, domain::products::records::ProductUuid};

/// Cart Record
///
/// The basket holds each line's price snapshot and quantity; `details` holds the display
/// snapshot taken on the first add of each product.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub user: UserUuid,
    pub lines: Basket<'static, ProductUuid>,
    pub details: FxHashMap<ProductUuid, CartItemDetails>,
    pub updated_at: Timestamp,
}

/// Product name and image as they were when first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemDetails {
    pub name: String,
    pub image: String,
}
