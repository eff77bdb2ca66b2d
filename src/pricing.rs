//! Pricing
//!
//! Line totals, tax and shipping. Every amount is computed in minor units and
//! rounded half away from zero where a percentage is applied.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{basket::Basket, items::Line, receipt::Receipt};

/// Errors that can occur while pricing lines, baskets or orders.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoItems,

    /// A multiplication or percentage did not fit in minor units.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Multiply a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in `i64` minor units.
pub fn line_total<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the total price of a list of lines
///
/// # Errors
///
/// - [`PricingError::NoItems`]: No lines were provided, so currency could not be determined.
/// - [`PricingError::Overflow`]: A line total did not fit in minor units.
/// - [`PricingError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a, K>(lines: &[Line<'a, K>]) -> Result<Money<'a, Currency>, PricingError> {
    let first = lines.first().ok_or(PricingError::NoItems)?;

    lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| Ok(acc.add(line.total()?)?),
    )
}

/// Calculate a percentage of a minor unit amount.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result cannot be represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::Overflow)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the inner Decimal
        .checked_mul(minor)
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}

/// Sales tax charged on a subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Create a tax rate from a fractional percentage (`0.1` is 10%).
    pub fn new(rate: Percentage) -> Self {
        Self(rate)
    }

    /// Tax due on `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the tax cannot be represented in minor units.
    pub fn tax_on<'a>(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        let subtotal_minor = subtotal
            .try_to_minor_units()
            .map_err(|_overflow| PricingError::Overflow)?;

        let minor = percent_of_minor(&self.0, subtotal_minor)?;

        Ok(Money::from_minor(minor, subtotal.currency()))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Percentage::from(0.1))
    }
}

/// A shipping fee charged once the subtotal reaches `min_subtotal`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingTier<'a> {
    min_subtotal: Money<'a, Currency>,
    fee: Money<'a, Currency>,
}

impl<'a> ShippingTier<'a> {
    /// Create a tier.
    pub fn new(min_subtotal: Money<'a, Currency>, fee: Money<'a, Currency>) -> Self {
        Self { min_subtotal, fee }
    }
}

/// How shipping is charged for a non-empty basket.
#[derive(Debug, Clone, PartialEq)]
pub enum ShippingPolicy<'a> {
    /// The same fee regardless of subtotal.
    Flat(Money<'a, Currency>),

    /// The fee of the highest tier whose minimum the subtotal reaches.
    Tiered(SmallVec<[ShippingTier<'a>; 4]>),
}

impl<'a> ShippingPolicy<'a> {
    /// Charge `fee` below `threshold` and nothing from `threshold` upwards.
    pub fn free_over(fee: Money<'a, Currency>, threshold: Money<'a, Currency>) -> Self {
        let zero = Money::from_minor(0, fee.currency());

        Self::Tiered(smallvec![
            ShippingTier::new(zero, fee),
            ShippingTier::new(threshold, zero),
        ])
    }

    /// Shipping fee for a basket with the given subtotal.
    ///
    /// A subtotal below every tier ships for free.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Money`] if the fee currency differs from the subtotal currency.
    pub fn fee_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        let zero = Money::from_minor(0, subtotal.currency());

        let fee = match self {
            Self::Flat(fee) => *fee,
            Self::Tiered(tiers) => tiers
                .iter()
                .filter(|tier| tier.min_subtotal.amount() <= subtotal.amount())
                .max_by_key(|tier| *tier.min_subtotal.amount())
                .map_or(zero, |tier| tier.fee),
        };

        // Adding to a zero in the subtotal's currency surfaces any mismatch.
        Ok(zero.add(fee)?)
    }
}

/// Tax rate and shipping policy used to turn a basket into a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSchedule<'a> {
    tax: TaxRate,
    shipping: ShippingPolicy<'a>,
}

impl<'a> PriceSchedule<'a> {
    /// Create a schedule from a tax rate and shipping policy.
    pub fn new(tax: TaxRate, shipping: ShippingPolicy<'a>) -> Self {
        Self { tax, shipping }
    }

    /// 10% tax, $10 shipping, free shipping from $100 (in `currency` minor units).
    pub fn standard(currency: &'a Currency) -> Self {
        Self::new(
            TaxRate::default(),
            ShippingPolicy::free_over(
                Money::from_minor(10_00, currency),
                Money::from_minor(100_00, currency),
            ),
        )
    }

    /// Compute item count, subtotal, tax, shipping and total for a basket.
    ///
    /// An empty basket has a zero receipt; shipping is only charged when there is something to
    /// ship.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on overflow or currency mismatch.
    pub fn receipt<K>(&self, basket: &Basket<'a, K>) -> Result<Receipt<'a>, PricingError>
    where
        K: PartialEq,
    {
        let subtotal = basket.subtotal()?;
        let tax = self.tax.tax_on(&subtotal)?;

        let shipping = if basket.is_empty() {
            Money::from_minor(0, basket.currency())
        } else {
            self.shipping.fee_for(&subtotal)?
        };

        let total = subtotal.add(tax)?.add(shipping)?;

        Ok(Receipt::new(
            basket.item_count(),
            subtotal,
            tax,
            shipping,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, iso::USD)
    }

    #[test]
    fn test_total_price() -> TestResult {
        let lines = [
            Line::new(1, usd(100), 2),
            Line::new(2, usd(250), 1),
        ];

        assert_eq!(total_price(&lines)?, usd(450));

        Ok(())
    }

    #[test]
    fn test_total_price_empty() {
        let lines: [Line<'static, u8>; 0] = [];

        assert!(matches!(total_price(&lines), Err(PricingError::NoItems)));
    }

    #[test]
    fn total_price_currency_mismatch_errors() {
        let lines = [
            Line::new(1, usd(100), 1),
            Line::new(2, Money::from_minor(100, iso::GBP), 1),
        ];

        assert!(matches!(
            total_price(&lines),
            Err(PricingError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(percent_of_minor(&Percentage::from(0.1), 1_005)?, 101);
        assert_eq!(percent_of_minor(&Percentage::from(0.1), 1_004)?, 100);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let result = percent_of_minor(&Percentage::from(2.0), i64::MAX);

        assert!(matches!(result, Err(PricingError::Overflow)));
    }

    #[test]
    fn tax_on_subtotal_beyond_minor_units_errors() -> TestResult {
        let max = usd(i64::MAX);
        let subtotal = max.add(max)?;

        assert_eq!(TaxRate::default().tax_on(&subtotal), Err(PricingError::Overflow));

        Ok(())
    }

    #[test]
    fn default_tax_is_ten_percent() -> TestResult {
        assert_eq!(TaxRate::default().tax_on(&usd(250_00))?, usd(25_00));

        Ok(())
    }

    #[test]
    fn flat_shipping_ignores_subtotal() -> TestResult {
        let policy = ShippingPolicy::Flat(usd(5_00));

        assert_eq!(policy.fee_for(&usd(1))?, usd(5_00));
        assert_eq!(policy.fee_for(&usd(1_000_00))?, usd(5_00));

        Ok(())
    }

    #[test]
    fn tiered_shipping_picks_highest_reached_tier() -> TestResult {
        let policy = ShippingPolicy::Tiered(smallvec![
            ShippingTier::new(usd(0), usd(15_00)),
            ShippingTier::new(usd(50_00), usd(8_00)),
            ShippingTier::new(usd(200_00), usd(0)),
        ]);

        assert_eq!(policy.fee_for(&usd(49_99))?, usd(15_00));
        assert_eq!(policy.fee_for(&usd(50_00))?, usd(8_00));
        assert_eq!(policy.fee_for(&usd(199_99))?, usd(8_00));
        assert_eq!(policy.fee_for(&usd(200_00))?, usd(0));

        Ok(())
    }

    #[test]
    fn tiered_shipping_below_every_tier_is_free() -> TestResult {
        let policy = ShippingPolicy::Tiered(smallvec![ShippingTier::new(usd(10_00), usd(3_00))]);

        assert_eq!(policy.fee_for(&usd(9_99))?, usd(0));

        Ok(())
    }

    #[test]
    fn shipping_fee_in_other_currency_errors() {
        let policy = ShippingPolicy::Flat(Money::from_minor(5_00, iso::GBP));

        assert!(matches!(
            policy.fee_for(&usd(10_00)),
            Err(PricingError::Money(MoneyError::CurrencyMismatch { .. }))
        ));
    }

    #[test]
    fn standard_schedule_charges_shipping_below_threshold() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("opal", usd(45_00), 2)?;

        let receipt = PriceSchedule::standard(iso::USD).receipt(&basket)?;

        assert_eq!(receipt.item_count(), 2);
        assert_eq!(receipt.subtotal(), usd(90_00));
        assert_eq!(receipt.tax(), usd(9_00));
        assert_eq!(receipt.shipping(), usd(10_00));
        assert_eq!(receipt.total(), usd(109_00));

        Ok(())
    }

    #[test]
    fn standard_schedule_ships_free_from_threshold() -> TestResult {
        let mut basket = Basket::new(iso::USD);

        basket.add("sapphire", usd(100_00), 1)?;

        let receipt = PriceSchedule::standard(iso::USD).receipt(&basket)?;

        assert_eq!(receipt.shipping(), usd(0));
        assert_eq!(receipt.total(), usd(110_00));

        Ok(())
    }

    #[test]
    fn empty_basket_has_zero_receipt() -> TestResult {
        let basket: Basket<'_, &str> = Basket::new(iso::USD);

        let receipt = PriceSchedule::standard(iso::USD).receipt(&basket)?;

        assert_eq!(receipt.item_count(), 0);
        assert_eq!(receipt.subtotal(), usd(0));
        assert_eq!(receipt.tax(), usd(0));
        assert_eq!(receipt.shipping(), usd(0));
        assert_eq!(receipt.total(), usd(0));

        Ok(())
    }
}
