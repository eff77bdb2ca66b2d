//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartEnvelope},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.delete",
    skip(product, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));
    span.record("product_uuid", tracing::field::display(product));

    let cart = state
        .app
        .carts
        .remove_item(user.uuid, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(cart, state.currency)))
}
