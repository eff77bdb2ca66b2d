//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

use super::get::CartEnvelope;

/// Clear Cart Handler
///
/// Removes every line from the signed-in user's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
#[tracing::instrument(
    name = "carts.clear",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

    let cart = state
        .app
        .carts
        .clear_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(cart, state.currency)))
}
