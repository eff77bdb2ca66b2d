//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use gemstore_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::ProductUnavailable => {
            StatusError::bad_request().brief("Product is not available")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive whole number")
        }
        CartsServiceError::TotalOutOfRange => {
            StatusError::bad_request().brief("Cart total is too large")
        }
        CartsServiceError::Basket(source) => {
            error!("cart update failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Totals(source) => {
            error!("cart totals failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
