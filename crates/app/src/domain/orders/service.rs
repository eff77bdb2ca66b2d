//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::repository::CartsRepository,
        orders::{
            data::{NewOrder, OrderFilter},
            errors::OrdersServiceError,
            models::Order,
            numbers::{OrderNumberGenerator, RandomOrderNumbers, is_order_number},
            records::{CustomerDetails, OrderLineRecord, OrderRecord, OrderStatus, OrderUuid},
            repository::{OrdersRepository, to_order},
        },
        pricing::{Pricing, minor_units},
    },
};

/// Attempts at drawing an unused order number before giving up.
pub const MAX_ORDER_NUMBER_ATTEMPTS: usize = 10;

#[derive(Clone)]
pub struct InMemoryOrdersService {
    db: Db,
    pricing: Pricing,
    numbers: Arc<dyn OrderNumberGenerator>,
    orders_repository: OrdersRepository,
    carts_repository: CartsRepository,
}

impl InMemoryOrdersService {
    #[must_use]
    pub fn new(db: Db, pricing: Pricing) -> Self {
        Self::with_numbers(db, pricing, Arc::new(RandomOrderNumbers))
    }

    #[must_use]
    pub fn with_numbers(db: Db, pricing: Pricing, numbers: Arc<dyn OrderNumberGenerator>) -> Self {
        Self {
            db,
            pricing,
            numbers,
            orders_repository: OrdersRepository::new(),
            carts_repository: CartsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for InMemoryOrdersService {
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let tx = self.db.read().await;

        self.orders_repository
            .list_orders(&tx, filter)
            .into_iter()
            .map(|order| Ok(to_order(order, &self.pricing)?))
            .collect()
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let tx = self.db.read().await;

        let record = self.orders_repository.get_order(&tx, order)?;

        Ok(to_order(record, &self.pricing)?)
    }

    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(order_uuid = tracing::field::Empty, order_number = tracing::field::Empty),
        err
    )]
    async fn place_order(&self, user: UserUuid, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let customer = validate_customer(order.customer)?;

        let mut tx = self.db.begin().await;

        let cart = self
            .carts_repository
            .get_cart(&tx, user)
            .filter(|cart| !cart.lines.is_empty())
            .ok_or(OrdersServiceError::EmptyCart)?;

        let lines = cart
            .lines
            .lines()
            .iter()
            .map(|line| {
                Ok(OrderLineRecord {
                    product_uuid: *line.key(),
                    name: cart
                        .details
                        .get(line.key())
                        .map(|details| details.name.clone())
                        .unwrap_or_default(),
                    unit_price: minor_units(line.unit_price())?,
                    quantity: line.quantity(),
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        let now = Timestamp::now();

        let number = (0..MAX_ORDER_NUMBER_ATTEMPTS)
            .map(|_| self.numbers.generate(now))
            .find(|candidate| {
                if !is_order_number(candidate) {
                    warn!(order_number = %candidate, "malformed order number; retrying");

                    return false;
                }

                let taken = self.orders_repository.number_taken(&tx, candidate);

                if taken {
                    warn!(order_number = %candidate, "order number collision; retrying");
                }

                !taken
            })
            .ok_or(OrdersServiceError::OrderNumberExhausted)?;

        let record = OrderRecord {
            uuid: OrderUuid::new(),
            number,
            user,
            customer,
            lines,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let placed = to_order(record.clone(), &self.pricing).map_err(|error| {
            if error.is_out_of_range() {
                OrdersServiceError::TotalOutOfRange
            } else {
                OrdersServiceError::Totals(error)
            }
        })?;

        self.orders_repository.create_order(&mut tx, record);
        self.carts_repository.delete_cart(&mut tx, user);

        let span = tracing::Span::current();

        span.record("order_uuid", tracing::field::display(placed.uuid));
        span.record("order_number", placed.number.as_str());

        info!("order placed");

        Ok(placed)
    }

    #[tracing::instrument(name = "orders.service.update_status", skip(self), err)]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await;

        let record = self
            .orders_repository
            .update_status(&mut tx, order, status, Timestamp::now())?;

        Ok(to_order(record, &self.pricing)?)
    }
}

fn validate_customer(customer: CustomerDetails) -> Result<CustomerDetails, OrdersServiceError> {
    let name = customer.name.trim();
    let email = customer.email.trim();
    let address = customer.address.trim();

    if name.is_empty() {
        return Err(OrdersServiceError::InvalidCustomer("name"));
    }

    if !is_email(email) {
        return Err(OrdersServiceError::InvalidCustomer("email"));
    }

    if address.is_empty() {
        return Err(OrdersServiceError::InvalidCustomer("address"));
    }

    Ok(CustomerDetails {
        name: name.to_string(),
        email: email.to_string(),
        address: address.to_string(),
    })
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && !host.is_empty()
        && !tld.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders matching `filter`, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Turn the user's cart into a pending order and empty the cart.
    async fn place_order(&self, user: UserUuid, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Set an order's status. Any status may follow any other.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
