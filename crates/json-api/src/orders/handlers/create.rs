//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    observability::observe_order_placed,
    orders::{errors::into_status_error, requests::PlaceOrderRequest},
    state::State,
};

use super::get::OrderEnvelope;

/// Place Order Handler
///
/// Checks out the signed-in user's cart and empties it.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid customer details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        order_number = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));

    let order = state
        .app
        .orders
        .place_order(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));
    span.record("order_number", order.number.as_str());

    observe_order_placed();

    info!(total = order.totals.total, "checkout complete");

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderEnvelope::new(order, state.currency)))
}
