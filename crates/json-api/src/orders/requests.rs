//! Order Request Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use gemstore_app::domain::orders::{data::NewOrder, records::CustomerDetails};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub name: String,
    pub email: String,

    /// Shipping address
    pub address: String,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder {
            customer: CustomerDetails {
                name: request.name,
                email: request.email,
                address: request.address,
            },
        }
    }
}

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,
}
