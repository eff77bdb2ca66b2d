//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use gemstore_app::{
        auth::UserUuid,
        domain::{
            orders::{
                MockOrdersService,
                models::{Order, OrderItem},
                records::{CustomerDetails, OrderStatus, OrderUuid},
            },
            pricing::Totals,
            products::records::ProductUuid,
        },
    };

    pub(super) fn make_order(uuid: OrderUuid, user: UserUuid, status: OrderStatus) -> Order {
        Order {
            uuid,
            number: "ORD-20260301-042".to_string(),
            user,
            customer: CustomerDetails {
                name: "Demo Customer".to_string(),
                email: "customer@preciousgems.com".to_string(),
                address: "1 Quarry Lane".to_string(),
            },
            items: vec![OrderItem {
                product_uuid: ProductUuid::new(),
                name: "Emerald Ring".to_string(),
                price: 95_00,
                quantity: 1,
                line_total: 95_00,
            }],
            status,
            totals: Totals {
                item_count: 1,
                subtotal: 95_00,
                tax: 9_50,
                shipping: 10_00,
                total: 114_50,
            },
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    /// Expect no calls other than the one the test sets up.
    pub(super) fn orders_mock_except(except: &str) -> MockOrdersService {
        let mut orders = MockOrdersService::new();

        if except != "list_orders" {
            orders.expect_list_orders().never();
        }
        if except != "get_order" {
            orders.expect_get_order().never();
        }
        if except != "place_order" {
            orders.expect_place_order().never();
        }
        if except != "update_status" {
            orders.expect_update_status().never();
        }

        orders
    }
}
