//! App Context

use std::sync::Arc;

use jiff::Timestamp;
use tracing::info;

use crate::{
    auth::{AuthService, InMemoryAuthService},
    database::{Db, Tables},
    domain::{
        carts::{CartsService, InMemoryCartsService},
        orders::{InMemoryOrdersService, OrdersService},
        pricing::Pricing,
        products::{InMemoryProductsService, ProductsService, seed::seed_catalog},
    },
};

/// Settings the services are built from.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub pricing: Pricing,

    /// Load the demo gemstone catalog at start-up.
    pub seed_catalog: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context over a fresh in-memory database.
    #[must_use]
    pub fn in_memory(settings: AppSettings) -> Self {
        let mut tables = Tables::default();

        if settings.seed_catalog {
            let seeded = seed_catalog(&mut tables, Timestamp::now());

            info!(products = seeded, "seeded product catalog");
        }

        let db = Db::new(tables);

        Self {
            products: Arc::new(InMemoryProductsService::new(db.clone())),
            carts: Arc::new(InMemoryCartsService::new(db.clone(), settings.pricing.clone())),
            orders: Arc::new(InMemoryOrdersService::new(db, settings.pricing)),
            auth: Arc::new(InMemoryAuthService::new()),
        }
    }
}
