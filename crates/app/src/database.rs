//! In-memory storage

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    auth::UserUuid,
    domain::{
        carts::records::CartRecord,
        orders::records::{OrderRecord, OrderUuid},
        products::records::{ProductRecord, ProductUuid},
    },
};

/// Every table the services read and write.
#[derive(Debug, Default)]
pub struct Tables {
    pub(crate) products: FxHashMap<ProductUuid, ProductRecord>,
    pub(crate) carts: FxHashMap<UserUuid, CartRecord>,
    pub(crate) orders: FxHashMap<OrderUuid, OrderRecord>,
}

/// Shared handle to the process-local tables.
///
/// All tables sit behind a single lock, so a service operation holding a write guard sees and
/// changes a consistent snapshot across products, carts and orders.
#[derive(Debug, Clone, Default)]
pub struct Db {
    tables: Arc<RwLock<Tables>>,
}

impl Db {
    #[must_use]
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Acquire shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquire exclusive write access. Changes are visible once the guard is dropped.
    pub async fn begin(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
