//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use gemstore_app::domain::products::{
    data::{ProductQuery, ProductSort},
    records::{ProductCategory, ProductStatus},
};

use crate::{extensions::*, products::errors::into_status_error, state::State};

use super::get::ProductResponse;

/// Matches every status in the `status` filter.
const ALL_STATUSES: &str = "all";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub success: bool,

    /// Number of products returned
    pub count: usize,

    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists the catalog. Only active products are listed unless `status` says otherwise
/// (`status=all` lists every product).
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one extractor per query filter")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    in_stock: QueryParam<bool, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductQuery {
        category: category
            .into_inner()
            .map(|value| value.parse::<ProductCategory>())
            .transpose()
            .or_400("Invalid filter")?,
        status: parse_status(status.into_inner())?,
        search: search.into_inner(),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        in_stock: in_stock.into_inner().unwrap_or_default(),
        sort: sort
            .into_inner()
            .map(|value| value.parse::<ProductSort>())
            .transpose()
            .or_400("Invalid sort")?
            .unwrap_or_default(),
    };

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        success: true,
        count: products.len(),
        products: products
            .into_iter()
            .map(|product| ProductResponse::new(product, state.currency))
            .collect(),
    }))
}

fn parse_status(value: Option<String>) -> Result<Option<ProductStatus>, StatusError> {
    match value.as_deref().map(str::trim) {
        None => Ok(Some(ProductStatus::Active)),
        Some(value) if value.eq_ignore_ascii_case(ALL_STATUSES) => Ok(None),
        Some(value) => value.parse().map(Some).or_400("Invalid filter"),
    }
}
