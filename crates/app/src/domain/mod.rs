//! Storefront Domain Concerns

pub mod carts;
pub mod orders;
pub mod pricing;
pub mod products;
