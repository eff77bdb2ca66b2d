//! Test Helpers

use crate::domain::{
    orders::records::CustomerDetails,
    products::{
        data::NewProduct,
        records::{ProductCategory, ProductStatus, ProductUuid},
    },
};

/// An active, in-stock product.
pub(crate) fn new_product(uuid: ProductUuid, name: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid,
        name: name.to_string(),
        description: format!("{name} for testing"),
        price,
        category: ProductCategory::Other,
        stock: 10,
        image: "/images/test.jpg".to_string(),
        status: ProductStatus::Active,
    }
}

pub(crate) fn customer_details() -> CustomerDetails {
    CustomerDetails {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        address: "1 Gem Lane, Springfield".to_string(),
    }
}
