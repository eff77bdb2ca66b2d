//! Order Data

use crate::{
    auth::UserUuid,
    domain::orders::records::{CustomerDetails, OrderStatus},
};

/// New Order Data
///
/// The lines come from the user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: CustomerDetails,
}

/// Order listing filter. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub user: Option<UserUuid>,
    pub status: Option<OrderStatus>,
}
