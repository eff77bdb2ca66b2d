//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::domain::carts::models::{Cart, CartItem};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
///
/// Amounts are in cents of `currency`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines in the order they were first added
    pub items: Vec<CartItemResponse>,

    /// Total units across all lines
    pub item_count: u64,

    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
    pub currency: String,

    /// The date and time the cart last changed
    pub updated_at: Option<String>,
}

impl CartResponse {
    pub(crate) fn new(cart: Cart, currency: &str) -> Self {
        CartResponse {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            item_count: cart.totals.item_count,
            subtotal: cart.totals.subtotal,
            tax: cart.totals.tax,
            shipping: cart.totals.shipping,
            total: cart.totals.total,
            currency: currency.to_string(),
            updated_at: cart.updated_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub product_uuid: Uuid,

    /// Product name when first added
    pub name: String,

    /// Unit price when first added
    pub price: u64,

    pub quantity: u32,
    pub image: String,
    pub line_total: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into(),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            image: item.image,
            line_total: item.line_total,
        }
    }
}

/// Cart Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub success: bool,
    pub cart: CartResponse,
}

impl CartEnvelope {
    pub(crate) fn new(cart: Cart, currency: &str) -> Self {
        Self {
            success: true,
            cart: CartResponse::new(cart, currency),
        }
    }
}

/// Get Cart Handler
///
/// Returns the signed-in user's cart. A user who never added anything gets an empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(cart, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use gemstore_app::{
        auth::CUSTOMER_USER_UUID,
        domain::{carts::MockCartsService, products::records::ProductUuid},
    };

    use crate::{
        envelope::ErrorResponse,
        test_helpers::{customer, public_service, service_as, state_with_carts},
    };

    use super::{
        super::tests::{carts_mock_except, empty_cart, make_cart},
        *,
    };

    fn route() -> Router {
        Router::with_path("cart").get(handler)
    }

    fn make_service(carts: MockCartsService) -> Service {
        service_as(state_with_carts(carts), customer(), route())
    }

    #[tokio::test]
    async fn get_cart_returns_totals() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = carts_mock_except("get_cart");

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == CUSTOMER_USER_UUID)
            .return_once(move |user| Ok(make_cart(user, product, 25_00, 2)));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        let body: CartEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.cart.item_count, 2);
        assert_eq!(body.cart.subtotal, 50_00);
        assert_eq!(body.cart.tax, 5_00);
        assert_eq!(body.cart.shipping, 10_00);
        assert_eq!(body.cart.total, 65_00);
        assert_eq!(body.cart.currency, "USD");
        assert_eq!(
            body.cart.items.first().map(|item| item.product_uuid),
            Some(product.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_for_new_user_is_empty() -> TestResult {
        let mut carts = carts_mock_except("get_cart");

        carts
            .expect_get_cart()
            .once()
            .return_once(|user| Ok(empty_cart(user)));

        let body: CartEnvelope = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(body.cart.items.is_empty());
        assert_eq!(body.cart.total, 0);
        assert_eq!(body.cart.updated_at, None);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_signed_out_returns_401() -> TestResult {
        let service = public_service(state_with_carts(carts_mock_except("")), route());

        let mut res = TestClient::get("http://example.com/cart").send(&service).await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "Authentication required");

        Ok(())
    }
}
