//! Order Models

use jiff::Timestamp;

use crate::{
    auth::UserUuid,
    domain::{
        orders::records::{CustomerDetails, OrderStatus, OrderUuid},
        pricing::Totals,
        products::records::ProductUuid,
    },
};

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub number: String,
    pub user: UserUuid,
    pub customer: CustomerDetails,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub totals: Totals,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// OrderItem Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

