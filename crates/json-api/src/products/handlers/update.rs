//! Update Product Handler

use std::sync::Arc;

use salvo::{
    Depot,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, requests::ProductRequest},
    state::State,
};

use super::get::ProductEnvelope;

/// Update Product Handler
///
/// Replaces every editable field. Admin only.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip_all,
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let product = state
        .app
        .products
        .update_product(product.into(), json.into_inner().into_update()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductEnvelope::new(product, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use gemstore_app::{
        auth::User,
        domain::products::{
            MockProductsService, ProductsServiceError,
            records::{ProductCategory, ProductStatus, ProductUuid},
        },
    };

    use crate::{
        envelope::ErrorResponse,
        test_helpers::{admin, customer, service_as, state_with_products},
    };

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService, user: User) -> Service {
        service_as(
            state_with_products(products),
            user,
            Router::with_path("products/{product}").put(handler),
        )
    }

    fn only_update(products: &mut MockProductsService) {
        products.expect_list_products().never();
        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_delete_product().never();
    }

    fn request_body() -> serde_json::Value {
        json!({
            "name": "Padparadscha",
            "description": "Pink-orange sapphire",
            "price": 4200_00,
            "category": "sapphires",
            "stock": 0,
            "image": "/images/padparadscha.jpg",
            "status": "inactive",
        })
    }

    #[tokio::test]
    async fn update_product_returns_200() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && update.name == "Padparadscha"
                    && update.category == ProductCategory::Sapphires
                    && update.status == ProductStatus::Inactive
                    && update.stock == 0
            })
            .return_once(move |_, update| {
                let mut product = make_product(uuid, &update.name, update.price);

                product.status = update.status;
                product.stock = update.stock;

                Ok(product)
            });

        only_update(&mut products);

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&request_body())
            .send(&make_service(products, admin()))
            .await;

        let body: ProductEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.product.status, "inactive");
        assert_eq!(body.product.price, 4200_00);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_not_found_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        only_update(&mut products);

        let mut res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&request_body())
            .send(&make_service(products, admin()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "Product not found");

        Ok(())
    }

    #[tokio::test]
    async fn update_product_as_customer_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_update_product().never();
        only_update(&mut products);

        let res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&request_body())
            .send(&make_service(products, customer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
