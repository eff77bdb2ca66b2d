//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_status_error, get::CartEnvelope},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,

    /// Units to add; defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds units of a product. Adding a product already in the cart increases its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or unavailable product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.create",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

    let cart = state
        .app
        .carts
        .add_item(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(cart, state.currency)))
}
