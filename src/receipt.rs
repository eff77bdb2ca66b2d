//! Receipt

use rusty_money::{Money, iso::Currency};

/// Priced summary of a basket: units, subtotal, tax, shipping and grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt<'a> {
    /// Total number of units across all lines
    item_count: u64,

    /// Sum of unit price times quantity for every line
    subtotal: Money<'a, Currency>,

    /// Tax charged on the subtotal
    tax: Money<'a, Currency>,

    /// Shipping fee
    shipping: Money<'a, Currency>,

    /// Subtotal plus tax plus shipping
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt with the given details.
    pub fn new(
        item_count: u64,
        subtotal: Money<'a, Currency>,
        tax: Money<'a, Currency>,
        shipping: Money<'a, Currency>,
        total: Money<'a, Currency>,
    ) -> Self {
        Self {
            item_count,
            subtotal,
            tax,
            shipping,
            total,
        }
    }

    /// Total number of units
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Total cost of the lines before tax and shipping
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Tax charged
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Shipping charged
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Total amount payable
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}
