//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, observability, orders, products};

/// Every API route. Catalog reads and login are public; everything else needs a session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/logout").post(auth::logout::handler))
                .push(Router::with_path("auth/me").get(auth::me::handler))
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("status").put(orders::status::handler)),
                        ),
                ),
        )
}
