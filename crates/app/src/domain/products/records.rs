//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: ProductCategory,
    pub stock: u32,
    pub image: String,
    pub status: ProductStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Only active products can be put in a cart.
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

/// Raised when parsing an unknown enum value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Diamonds,
    Rubies,
    Sapphires,
    Emeralds,
    Pearls,
    Opals,
    Other,
}

impl ProductCategory {
    pub const ALL: [Self; 7] = [
        Self::Diamonds,
        Self::Rubies,
        Self::Sapphires,
        Self::Emeralds,
        Self::Pearls,
        Self::Opals,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diamonds => "diamonds",
            Self::Rubies => "rubies",
            Self::Sapphires => "sapphires",
            Self::Emeralds => "emeralds",
            Self::Pearls => "pearls",
            Self::Opals => "opals",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: value.to_owned(),
            })
    }
}

/// Catalog visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

impl ProductStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Draft];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: value.to_owned(),
            })
    }
}
