//! Gemstore
//!
//! Cart arithmetic for the gemstore: price snapshots, basket lines, tax and shipping.

pub mod basket;
pub mod items;
pub mod prices;
pub mod pricing;
pub mod receipt;

pub mod prelude;
