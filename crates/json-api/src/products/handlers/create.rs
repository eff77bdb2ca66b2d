//! Create Product Handler

use std::sync::Arc;

use salvo::{Depot, http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, requests::ProductRequest},
    state::State,
};

use super::get::ProductEnvelope;

/// Create Product Handler
///
/// Admin only.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip_all,
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into_new_product()?)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEnvelope::new(product, state.currency)))
}
