//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::domain::orders::{data::OrderFilter, records::OrderStatus};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

use super::get::OrderResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub success: bool,
    pub count: usize,

    /// Newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Customers list their own orders. Admins list every order and may filter by `status` and
/// `user_uuid`; customers' filters other than `status` are ignored.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    user_uuid: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<OrderStatus>())
        .transpose()
        .or_400("Invalid filter")?;

    let filter = if user.is_admin() {
        OrderFilter {
            user: user_uuid.into_inner().map(Into::into),
            status,
        }
    } else {
        OrderFilter {
            user: Some(user.uuid),
            status,
        }
    };

    let orders = state
        .app
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        success: true,
        count: orders.len(),
        orders: orders
            .into_iter()
            .map(|order| OrderResponse::new(order, state.currency))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use gemstore_app::{
        auth::{ADMIN_USER_UUID, CUSTOMER_USER_UUID, User},
        domain::orders::{MockOrdersService, records::OrderUuid},
    };

    use crate::{
        envelope::ErrorResponse,
        test_helpers::{admin, customer, service_as, state_with_orders},
    };

    use super::{
        super::tests::{make_order, orders_mock_except},
        *,
    };

    fn make_service(orders: MockOrdersService, user: User) -> Service {
        service_as(
            state_with_orders(orders),
            user,
            Router::with_path("orders").get(handler),
        )
    }

    fn expecting(filter: OrderFilter) -> MockOrdersService {
        let mut orders = orders_mock_except("list_orders");

        orders
            .expect_list_orders()
            .once()
            .withf(move |f| *f == filter)
            .return_once(move |filter| {
                let owner = filter.user.unwrap_or(CUSTOMER_USER_UUID);

                Ok(vec![make_order(
                    OrderUuid::new(),
                    owner,
                    filter.status.unwrap_or_default(),
                )])
            });

        orders
    }

    #[tokio::test]
    async fn customer_lists_only_own_orders() -> TestResult {
        let orders = expecting(OrderFilter {
            user: Some(CUSTOMER_USER_UUID),
            status: None,
        });

        // A customer cannot widen the listing to another user.
        let mut res = TestClient::get(format!(
            "http://example.com/orders?user_uuid={}",
            ADMIN_USER_UUID.into_uuid()
        ))
        .send(&make_service(orders, customer()))
        .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn admin_lists_all_orders() -> TestResult {
        let orders = expecting(OrderFilter::default());

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn admin_filters_by_status_and_user() -> TestResult {
        let orders = expecting(OrderFilter {
            user: Some(CUSTOMER_USER_UUID),
            status: Some(OrderStatus::Shipped),
        });

        let mut res = TestClient::get(format!(
            "http://example.com/orders?status=shipped&user_uuid={}",
            CUSTOMER_USER_UUID.into_uuid()
        ))
        .send(&make_service(orders, admin()))
        .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.first().map(|order| order.status.as_str()),
            Some("shipped")
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_filter_returns_400() -> TestResult {
        let mut res = TestClient::get("http://example.com/orders?status=returned")
            .send(&make_service(orders_mock_except(""), admin()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body.error,
            "Invalid filter: unknown order status \"returned\""
        );

        Ok(())
    }
}
