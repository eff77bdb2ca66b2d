//! Orders Repository

use jiff::Timestamp;

use crate::{
    database::Tables,
    domain::{
        orders::{
            data::OrderFilter,
            errors::OrdersServiceError,
            models::{Order, OrderItem},
            records::{OrderRecord, OrderStatus, OrderUuid},
        },
        pricing::{Pricing, TotalsError, minor_units},
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct OrdersRepository;

impl OrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Matching orders, newest first.
    pub(crate) fn list_orders(&self, tx: &Tables, filter: OrderFilter) -> Vec<OrderRecord> {
        let mut orders: Vec<OrderRecord> = tx
            .orders
            .values()
            .filter(|order| filter.user.is_none_or(|user| order.user == user))
            .filter(|order| filter.status.is_none_or(|status| order.status == status))
            .cloned()
            .collect();

        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        orders
    }

    pub(crate) fn get_order(
        &self,
        tx: &Tables,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        tx.orders
            .get(&order)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    pub(crate) fn number_taken(&self, tx: &Tables, number: &str) -> bool {
        tx.orders.values().any(|order| order.number == number)
    }

    pub(crate) fn create_order(&self, tx: &mut Tables, order: OrderRecord) {
        tx.orders.insert(order.uuid, order);
    }

    pub(crate) fn update_status(
        &self,
        tx: &mut Tables,
        order: OrderUuid,
        status: OrderStatus,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let record = tx
            .orders
            .get_mut(&order)
            .ok_or(OrdersServiceError::NotFound)?;

        record.status = status;
        record.updated_at = now;

        Ok(record.clone())
    }
}

/// Render an order with totals derived from its line snapshots.
pub(crate) fn to_order(record: OrderRecord, pricing: &Pricing) -> Result<Order, TotalsError> {
    let mut basket = pricing.basket();

    for line in &record.lines {
        basket.add(line.product_uuid, pricing.money(line.unit_price)?, line.quantity)?;
    }

    let items = record
        .lines
        .into_iter()
        .zip(basket.lines())
        .map(|(line, priced)| {
            Ok(OrderItem {
                product_uuid: line.product_uuid,
                name: line.name,
                price: line.unit_price,
                quantity: line.quantity,
                line_total: minor_units(&priced.total()?)?,
            })
        })
        .collect::<Result<Vec<_>, TotalsError>>()?;

    Ok(Order {
        uuid: record.uuid,
        number: record.number,
        user: record.user,
        customer: record.customer,
        items,
        status: record.status,
        totals: pricing.totals(&basket)?,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}
