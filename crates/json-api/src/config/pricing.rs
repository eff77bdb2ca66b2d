//! Pricing Config

use clap::Args;
use rusty_money::iso;
use thiserror::Error;

use gemstore_app::domain::pricing::{Pricing, TotalsError};

/// Currency, tax and shipping settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO 4217 currency code for every price.
    #[arg(long, env = "CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Sales tax as a fraction of the subtotal.
    #[arg(long, env = "TAX_RATE", default_value_t = 0.1_f64)]
    pub tax_rate: f64,

    /// Shipping fee in minor units.
    #[arg(long, env = "FLAT_SHIPPING_FEE", default_value_t = 1_000_u64)]
    pub flat_shipping_fee: u64,

    /// Subtotal in minor units from which shipping is free; 0 charges the fee on every order.
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = 10_000_u64)]
    pub free_shipping_threshold: u64,
}

/// Invalid pricing settings.
#[derive(Debug, Error)]
pub enum PricingConfigError {
    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The tax rate is negative or not a number.
    #[error("tax rate must be a non-negative number, got {0}")]
    InvalidTaxRate(f64),

    /// An amount does not fit in minor units.
    #[error("invalid pricing amount: {0}")]
    Amount(#[from] TotalsError),
}

impl PricingConfig {
    /// Build the pricing schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingConfigError`] for an unknown currency, a negative tax rate or an
    /// out-of-range amount.
    pub fn pricing(&self) -> Result<Pricing, PricingConfigError> {
        let code = self.currency.trim().to_ascii_uppercase();

        let currency =
            iso::find(&code).ok_or_else(|| PricingConfigError::UnknownCurrency(code.clone()))?;

        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(PricingConfigError::InvalidTaxRate(self.tax_rate));
        }

        Ok(Pricing::from_settings(
            currency,
            self.tax_rate,
            self.flat_shipping_fee,
            (self.free_shipping_threshold > 0).then_some(self.free_shipping_threshold),
        )?)
    }
}
