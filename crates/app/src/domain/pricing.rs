//! Pricing
//!
//! Bridges stored minor-unit amounts and the basket arithmetic in `gemstore`.

use decimal_percentage::Percentage;
use gemstore::{
    basket::{Basket, BasketError},
    prices::{Price, PriceError},
    pricing::{PriceSchedule, PricingError, ShippingPolicy, TaxRate},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised while computing totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Basket(#[from] BasketError),
}

impl TotalsError {
    /// Whether the error comes from an amount or quantity too large to represent.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::Price(PriceError::OutOfRange(_) | PriceError::Unrepresentable)
                | Self::Pricing(PricingError::Overflow | PricingError::Money(MoneyError::Overflow))
                | Self::Basket(BasketError::QuantityOverflow)
        )
    }
}

/// Derived totals for a cart or order, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub item_count: u64,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

/// Currency plus the tax and shipping schedule applied to every cart and order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    currency: &'static Currency,
    schedule: PriceSchedule<'static>,
}

impl Pricing {
    #[must_use]
    pub fn new(currency: &'static Currency, schedule: PriceSchedule<'static>) -> Self {
        Self { currency, schedule }
    }

    /// 10% tax, flat fee below the free shipping threshold.
    #[must_use]
    pub fn standard(currency: &'static Currency) -> Self {
        Self::new(currency, PriceSchedule::standard(currency))
    }

    /// Build a schedule from raw settings.
    ///
    /// A `free_shipping_threshold` of `None` charges `shipping_fee` on every non-empty basket.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if an amount does not fit in minor units.
    pub fn from_settings(
        currency: &'static Currency,
        tax_rate: f64,
        shipping_fee: u64,
        free_shipping_threshold: Option<u64>,
    ) -> Result<Self, TotalsError> {
        let fee = Price::new(shipping_fee).to_money(currency)?;

        let shipping = match free_shipping_threshold {
            Some(threshold) => {
                ShippingPolicy::free_over(fee, Price::new(threshold).to_money(currency)?)
            }
            None => ShippingPolicy::Flat(fee),
        };

        let schedule = PriceSchedule::new(TaxRate::new(Percentage::from(tax_rate)), shipping);

        Ok(Self::new(currency, schedule))
    }

    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// An empty basket in this currency.
    pub fn basket<K: PartialEq>(&self) -> Basket<'static, K> {
        Basket::new(self.currency)
    }

    /// Lift a stored amount into money.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::Price`] if the amount does not fit in signed minor units.
    pub fn money(&self, minor: u64) -> Result<Money<'static, Currency>, TotalsError> {
        Ok(Price::new(minor).to_money(self.currency)?)
    }

    /// Item count, subtotal, tax, shipping and total of `basket`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] on arithmetic overflow or a negative result.
    pub fn totals<K: PartialEq>(&self, basket: &Basket<'static, K>) -> Result<Totals, TotalsError> {
        let receipt = self.schedule.receipt(basket)?;

        Ok(Totals {
            item_count: receipt.item_count(),
            subtotal: minor_units(&receipt.subtotal())?,
            tax: minor_units(&receipt.tax())?,
            shipping: minor_units(&receipt.shipping())?,
            total: minor_units(&receipt.total())?,
        })
    }
}

/// Lower money back into stored minor units.
///
/// # Errors
///
/// Returns [`TotalsError::Price`] for negative amounts.
pub fn minor_units(money: &Money<'_, Currency>) -> Result<u64, TotalsError> {
    Ok(*Price::try_from_money(money)?)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn standard_totals_charge_tax_and_shipping() -> TestResult {
        let pricing = Pricing::standard(iso::USD);
        let mut basket = pricing.basket();

        basket.add("pearl", pricing.money(25_00)?, 2)?;

        let totals = pricing.totals(&basket)?;

        assert_eq!(
            totals,
            Totals {
                item_count: 2,
                subtotal: 50_00,
                tax: 5_00,
                shipping: 10_00,
                total: 65_00,
            }
        );

        Ok(())
    }

    #[test]
    fn empty_basket_totals_are_zero() -> TestResult {
        let pricing = Pricing::standard(iso::USD);
        let basket = pricing.basket::<&str>();

        assert_eq!(pricing.totals(&basket)?, Totals::default());

        Ok(())
    }

    #[test]
    fn flat_shipping_applies_at_any_subtotal() -> TestResult {
        let pricing = Pricing::from_settings(iso::USD, 0.2, 7_50, None)?;
        let mut basket = pricing.basket();

        basket.add("diamond", pricing.money(1_000_00)?, 1)?;

        let totals = pricing.totals(&basket)?;

        assert_eq!(totals.tax, 200_00);
        assert_eq!(totals.shipping, 7_50);
        assert_eq!(totals.total, 1_207_50);

        Ok(())
    }

    #[test]
    fn free_shipping_from_threshold() -> TestResult {
        let pricing = Pricing::from_settings(iso::USD, 0.1, 10_00, Some(100_00))?;
        let mut basket = pricing.basket();

        basket.add("ruby", pricing.money(100_00)?, 1)?;

        assert_eq!(pricing.totals(&basket)?.shipping, 0);

        Ok(())
    }

    #[test]
    fn money_rejects_amounts_above_i64_max() {
        let pricing = Pricing::standard(iso::USD);

        assert!(matches!(
            pricing.money(u64::MAX),
            Err(TotalsError::Price(PriceError::OutOfRange(_)))
        ));
    }

    #[test]
    fn overflowing_totals_are_out_of_range() -> TestResult {
        let pricing = Pricing::standard(iso::USD);
        let mut basket = pricing.basket();

        basket.add("diamond", pricing.money(i64::MAX.unsigned_abs())?, 1)?;
        basket.add("ruby", pricing.money(1)?, 1)?;

        let error = pricing.totals(&basket).err().ok_or("expected totals to overflow")?;

        assert!(error.is_out_of_range(), "{error:?}");
        assert!(!TotalsError::Price(PriceError::Negative(-1)).is_out_of_range());

        Ok(())
    }
}
