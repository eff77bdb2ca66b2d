//! Cart Models

use jiff::Timestamp;

use crate::{
    auth::UserUuid,
    domain::{pricing::Totals, products::records::ProductUuid},
};

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user: UserUuid,
    pub items: Vec<CartItem>,
    pub totals: Totals,

    /// `None` until the first change.
    pub updated_at: Option<Timestamp>,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub image: String,
    pub line_total: u64,
}
