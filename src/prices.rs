//! Prices

use std::ops::Deref;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised when moving between stored prices and money values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The stored amount does not fit in signed minor units.
    #[error("price of {0} minor units is out of range")]
    OutOfRange(u64),

    /// A money value was negative and cannot be stored as a price.
    #[error("amount of {0} minor units is negative")]
    Negative(i64),

    /// A money value does not fit in whole signed minor units.
    #[error("amount is not representable in minor units")]
    Unrepresentable,
}

/// Represents a price in pence/cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Lift the stored minor units into a money value in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] if the price exceeds `i64::MAX` minor units.
    pub fn to_money<'a>(self, currency: &'a Currency) -> Result<Money<'a, Currency>, PriceError> {
        let minor = i64::try_from(self.value).map_err(|_overflow| PriceError::OutOfRange(self.value))?;

        Ok(Money::from_minor(minor, currency))
    }

    /// Lower a money value back into stored minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts and
    /// [`PriceError::Unrepresentable`] for amounts beyond `i64` minor units.
    pub fn try_from_money(money: &Money<'_, Currency>) -> Result<Self, PriceError> {
        let minor = money
            .try_to_minor_units()
            .map_err(|_overflow| PriceError::Unrepresentable)?;

        u64::try_from(minor)
            .map(Self::new)
            .map_err(|_negative| PriceError::Negative(minor))
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
