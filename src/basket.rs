//! Basket
//!
//! The cart reducer: lines keyed by product, merged on repeat adds and
//! dropped when their quantity falls below one.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::Line,
    pricing::{PricingError, total_price},
};

/// Errors related to basket construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// A line's currency differs from the basket currency (index, line currency, basket currency).
    #[error("Line {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line was supplied with a quantity of zero (index).
    #[error("Line {0} has a quantity of zero")]
    ZeroQuantity(usize),

    /// A quantity exceeded the supported range.
    #[error("quantity exceeds the supported range")]
    QuantityOverflow,
}

/// Outcome of setting a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has the requested quantity.
    Updated,

    /// The requested quantity was below one, so the line was removed.
    Removed,

    /// No line matched the key.
    Unchanged,
}

/// Basket
#[derive(Debug, Clone)]
pub struct Basket<'a, K> {
    lines: Vec<Line<'a, K>>,
    currency: &'a Currency,
}

impl<'a, K> Basket<'a, K>
where
    K: PartialEq,
{
    /// Create a new, empty basket.
    pub fn new(currency: &'a Currency) -> Self {
        Basket {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a new basket with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if a line has the wrong currency or a zero quantity.
    pub fn with_lines(
        lines: impl Into<Vec<Line<'a, K>>>,
        currency: &'a Currency,
    ) -> Result<Self, BasketError> {
        let lines = lines.into();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            ensure_currency(i, line.unit_price(), currency)?;

            if line.quantity() == 0 {
                return Err(BasketError::ZeroQuantity(i));
            }

            Ok(())
        })?;

        Ok(Basket { lines, currency })
    }

    /// Add `quantity` units of `key`.
    ///
    /// Repeat adds of the same key increase the existing line's quantity and keep its
    /// original price snapshot. A quantity of zero changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` on currency mismatch or quantity overflow.
    pub fn add(
        &mut self,
        key: K,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<(), BasketError> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|line| *line.key() == key) {
            let quantity = line
                .quantity()
                .checked_add(quantity)
                .ok_or(BasketError::QuantityOverflow)?;

            line.set_quantity(quantity);

            return Ok(());
        }

        ensure_currency(self.lines.len(), &unit_price, self.currency)?;

        self.lines.push(Line::new(key, unit_price, quantity));

        Ok(())
    }

    /// Set the quantity of the line for `key`.
    ///
    /// Quantities below one remove the line. Unknown keys are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::QuantityOverflow`] if `quantity` does not fit in a `u32`.
    pub fn set_quantity(&mut self, key: &K, quantity: i64) -> Result<QuantityChange, BasketError> {
        let Some(position) = self.lines.iter().position(|line| line.key() == key) else {
            return Ok(QuantityChange::Unchanged);
        };

        if quantity < 1 {
            self.lines.remove(position);

            return Ok(QuantityChange::Removed);
        }

        let quantity = u32::try_from(quantity).map_err(|_overflow| BasketError::QuantityOverflow)?;

        if let Some(line) = self.lines.get_mut(position) {
            line.set_quantity(quantity);
        }

        Ok(QuantityChange::Updated)
    }

    /// Remove the line for `key`, returning whether one was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.key() != key);

        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the line for `key`, if present.
    pub fn line(&self, key: &K) -> Option<&Line<'a, K>> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[Line<'a, K>] {
        &self.lines
    }

    /// Calculate the subtotal of the basket.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.lines)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the basket.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

fn ensure_currency(
    index: usize,
    price: &Money<'_, Currency>,
    currency: &Currency,
) -> Result<(), BasketError> {
    let line_currency = price.currency();

    if line_currency == currency {
        Ok(())
    } else {
        Err(BasketError::CurrencyMismatch(
            index,
            line_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, iso::USD)
    }

    fn test_lines() -> [Line<'static, &'static str>; 3] {
        [
            Line::new("diamond", usd(100), 1),
            Line::new("ruby", usd(200), 2),
            Line::new("pearl", usd(300), 3),
        ]
    }

    #[test]
    fn new_with_currency() {
        let basket: Basket<'_, u8> = Basket::new(iso::GBP);

        assert_eq!(basket.currency, iso::GBP);
    }

    #[test]
    fn with_lines_currency_mismatch_errors() {
        let lines = [
            Line::new(1, Money::from_minor(100, iso::GBP), 1),
            Line::new(2, Money::from_minor(100, iso::USD), 1),
        ];

        let result = Basket::with_lines(lines, iso::GBP);

        match result {
            Err(BasketError::CurrencyMismatch(idx, line_currency, basket_currency)) => {
                assert_eq!(idx, 1);
                assert_eq!(line_currency, iso::USD.iso_alpha_code);
                assert_eq!(basket_currency, iso::GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn with_lines_zero_quantity_errors() {
        let lines = [Line::new(1, usd(100), 1), Line::new(2, usd(100), 0)];

        assert!(matches!(
            Basket::with_lines(lines, iso::USD),
            Err(BasketError::ZeroQuantity(1))
        ));
    }

    #[test]
    fn subtotal_is_sum_of_price_times_quantity() -> TestResult {
        let basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(basket.subtotal()?, usd(100 + 400 + 900));

        Ok(())
    }

    #[test]
    fn subtotal_with_no_lines() -> TestResult {
        let basket: Basket<'_, u8> = Basket::new(iso::GBP);

        assert_eq!(basket.subtotal()?, Money::from_minor(0, iso::GBP));

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() -> TestResult {
        let basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(basket.item_count(), 6);
        assert_eq!(basket.len(), 3);

        Ok(())
    }

    #[test]
    fn adding_same_key_twice_increments_quantity() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("emerald", usd(500), 1)?;
        basket.add("emerald", usd(500), 2)?;

        assert_eq!(basket.len(), 1, "repeat add should not duplicate the line");
        assert_eq!(basket.line(&"emerald").map(Line::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn repeat_add_keeps_first_price_snapshot() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("emerald", usd(500), 1)?;
        basket.add("emerald", usd(900), 1)?;

        assert_eq!(basket.subtotal()?, usd(1_000));

        Ok(())
    }

    #[test]
    fn adding_zero_quantity_is_a_no_op() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("opal", usd(500), 0)?;

        assert!(basket.is_empty());

        Ok(())
    }

    #[test]
    fn adding_in_other_currency_errors() {
        let mut basket = Basket::new(iso::USD);

        let result = basket.add("opal", Money::from_minor(500, iso::EUR), 1);

        assert!(matches!(result, Err(BasketError::CurrencyMismatch(0, _, _))));
    }

    #[test]
    fn adding_past_u32_max_overflows() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("opal", usd(1), u32::MAX)?;

        assert_eq!(
            basket.add("opal", usd(1), 1),
            Err(BasketError::QuantityOverflow)
        );

        Ok(())
    }

    #[test]
    fn set_quantity_updates_line() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(basket.set_quantity(&"ruby", 5)?, QuantityChange::Updated);
        assert_eq!(basket.line(&"ruby").map(Line::quantity), Some(5));

        Ok(())
    }

    #[test]
    fn set_quantity_zero_or_below_removes_line() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(basket.set_quantity(&"ruby", 0)?, QuantityChange::Removed);
        assert_eq!(basket.set_quantity(&"pearl", -3)?, QuantityChange::Removed);
        assert_eq!(basket.len(), 1);
        assert!(basket.line(&"ruby").is_none());

        Ok(())
    }

    #[test]
    fn set_quantity_unknown_key_is_a_no_op() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(basket.set_quantity(&"jade", 4)?, QuantityChange::Unchanged);
        assert_eq!(basket.item_count(), 6);

        Ok(())
    }

    #[test]
    fn set_quantity_above_u32_max_overflows() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert_eq!(
            basket.set_quantity(&"ruby", i64::from(u32::MAX) + 1),
            Err(BasketError::QuantityOverflow)
        );

        Ok(())
    }

    #[test]
    fn remove_reports_whether_a_line_was_present() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        assert!(basket.remove(&"diamond"));
        assert!(!basket.remove(&"diamond"));
        assert_eq!(basket.len(), 2);

        Ok(())
    }

    #[test]
    fn clear_empties_the_basket() -> TestResult {
        let mut basket = Basket::with_lines(test_lines(), iso::USD)?;

        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.item_count(), 0);

        Ok(())
    }
}
