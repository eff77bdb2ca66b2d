//! Gemstore prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError, QuantityChange},
    items::Line,
    prices::{Price, PriceError},
    pricing::{PriceSchedule, PricingError, ShippingPolicy, ShippingTier, TaxRate},
    receipt::Receipt,
};
