//! Items

use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, line_total};

/// A single product/quantity/price snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Line<'a, K> {
    key: K,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a, K> Line<'a, K> {
    /// Creates a new line for `quantity` units of `key` at `unit_price` each.
    pub fn new(key: K, unit_price: Money<'a, Currency>, quantity: u32) -> Self {
        Self {
            key,
            unit_price,
            quantity,
        }
    }

    /// Returns the key identifying what this line is for
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the number of units on this line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(&self.unit_price, self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}
