//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use gemstore_app::{
    auth::{ADMIN_USER_UUID, CUSTOMER_USER_UUID, MockAuthService, Role, User},
    context::AppContext,
    domain::{carts::MockCartsService, orders::MockOrdersService, products::MockProductsService},
};

use crate::{envelope::catcher, extensions::*, state::State};

pub(crate) const TEST_CURRENCY: &str = "USD";

pub(crate) fn admin() -> User {
    User {
        uuid: ADMIN_USER_UUID,
        email: "admin@preciousgems.com".to_string(),
        name: "Store Admin".to_string(),
        role: Role::Admin,
    }
}

pub(crate) fn customer() -> User {
    User {
        uuid: CUSTOMER_USER_UUID,
        email: "customer@preciousgems.com".to_string(),
        name: "Demo Customer".to_string(),
        role: Role::Customer,
    }
}

/// Inserts a fixed signed-in user, standing in for the auth middleware.
struct SignedIn(User);

#[salvo::handler]
impl SignedIn {
    async fn handle(&self, req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
        depot.insert_current_user(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_logout().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_place_order().never();
    orders.expect_update_status().never();

    orders
}

fn state(
    products: MockProductsService,
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    State::shared(
        AppContext {
            products: Arc::new(products),
            carts: Arc::new(carts),
            orders: Arc::new(orders),
            auth: Arc::new(auth),
        },
        TEST_CURRENCY,
    )
}

/// State whose services fail the test if called.
pub(crate) fn strict_state() -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state(
        products,
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    state(
        strict_products_mock(),
        carts,
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        orders,
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        auth,
    )
}

/// Unauthenticated service around `route`.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route)).catcher(catcher())
}

/// Service around `route` with `user` signed in.
pub(crate) fn service_as(state: Arc<State>, user: User, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(SignedIn(user))
            .push(route),
    )
    .catcher(catcher())
}
