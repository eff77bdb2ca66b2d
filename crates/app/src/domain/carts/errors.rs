//! Carts service errors.

use gemstore::basket::BasketError;
use thiserror::Error;

use crate::domain::pricing::TotalsError;

#[derive(Debug, Error, PartialEq)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("product is not available for purchase")]
    ProductUnavailable,

    #[error("quantity must be a positive whole number")]
    InvalidQuantity,

    #[error("cart total exceeds the supported range")]
    TotalOutOfRange,

    #[error("cart error")]
    Basket(#[source] BasketError),

    #[error("cart totals error")]
    Totals(#[from] TotalsError),
}

impl From<BasketError> for CartsServiceError {
    fn from(error: BasketError) -> Self {
        match error {
            BasketError::QuantityOverflow => Self::InvalidQuantity,
            BasketError::CurrencyMismatch(..) | BasketError::ZeroQuantity(_) => Self::Basket(error),
        }
    }
}
