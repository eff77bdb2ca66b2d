//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::domain::orders::{
    OrdersServiceError,
    models::{Order, OrderItem},
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
///
/// Amounts are in cents of `currency`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Human-facing order number, `ORD-YYYYMMDD-NNN`
    pub order_number: String,

    pub user_uuid: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub items: Vec<OrderItemResponse>,
    pub status: String,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderResponse {
    pub(crate) fn new(order: Order, currency: &str) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            order_number: order.number,
            user_uuid: order.user.into(),
            customer_name: order.customer.name,
            customer_email: order.customer.email,
            shipping_address: order.customer.address,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            status: order.status.to_string(),
            subtotal: order.totals.subtotal,
            tax: order.totals.tax,
            shipping: order.totals.shipping,
            total: order.totals.total,
            currency: currency.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into(),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            line_total: item.line_total,
        }
    }
}

/// Single Order Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub success: bool,
    pub order: OrderResponse,
}

impl OrderEnvelope {
    pub(crate) fn new(order: Order, currency: &str) -> Self {
        Self {
            success: true,
            order: OrderResponse::new(order, currency),
        }
    }
}

/// Get Order Handler
///
/// Customers see their own orders; admins see any order. Another customer's order is
/// reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if !user.is_admin() && order.user != user.uuid {
        return Err(into_status_error(OrdersServiceError::NotFound));
    }

    Ok(Json(OrderEnvelope::new(order, state.currency)))
}
