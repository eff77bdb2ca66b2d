//! Orders service errors.

use thiserror::Error;

use crate::domain::pricing::TotalsError;

#[derive(Debug, Error, PartialEq)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid customer details: {0}")]
    InvalidCustomer(&'static str),

    #[error("order total exceeds the supported range")]
    TotalOutOfRange,

    #[error("could not allocate a unique order number")]
    OrderNumberExhausted,

    #[error("order totals error")]
    Totals(#[from] TotalsError),
}
