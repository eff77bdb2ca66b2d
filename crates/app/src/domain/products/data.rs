//! Products Data

use std::str::FromStr;

use crate::domain::products::records::{
    ProductCategory, ProductStatus, ProductUuid, UnknownVariant,
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: ProductCategory,
    pub stock: u32,
    pub image: String,
    pub status: ProductStatus,
}

/// Product Update Data
///
/// Replaces every editable field of an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: ProductCategory,
    pub stock: u32,
    pub image: String,
    pub status: ProductStatus,
}

/// Catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
        }
    }
}

impl FromStr for ProductSort {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "sort",
                value: value.to_owned(),
            })
    }
}

/// Catalog filters. Every filter left as `None` matches all products.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    pub category: Option<ProductCategory>,
    pub status: Option<ProductStatus>,

    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,

    pub min_price: Option<u64>,
    pub max_price: Option<u64>,

    /// Only products with stock remaining.
    pub in_stock: bool,

    pub sort: ProductSort,
}
