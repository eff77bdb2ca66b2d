//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use gemstore_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidCustomer(field) => {
            StatusError::bad_request().brief(format!("Invalid customer {field}"))
        }
        OrdersServiceError::TotalOutOfRange => {
            StatusError::bad_request().brief("Order total is too large")
        }
        OrdersServiceError::OrderNumberExhausted => {
            error!("could not allocate a unique order number");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Totals(source) => {
            error!("order totals failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
