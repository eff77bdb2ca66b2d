//! Product Request Payloads

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstore_app::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductCategory, ProductStatus, ProductUuid},
};

use crate::extensions::*;

/// Product Request
///
/// Shared by create and update; update replaces every field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    /// Client-chosen UUID; generated when omitted. Ignored on update.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Price in cents
    pub price: u64,

    /// `diamonds`, `rubies`, `sapphires`, `emeralds`, `pearls`, `opals` or `other`
    pub category: String,

    #[serde(default)]
    pub stock: u32,

    pub image: String,

    /// `active` (default), `inactive` or `draft`
    #[serde(default)]
    pub status: Option<String>,
}

impl ProductRequest {
    fn category(&self) -> Result<ProductCategory, StatusError> {
        self.category.parse::<ProductCategory>().or_400("Invalid product")
    }

    fn status(&self) -> Result<ProductStatus, StatusError> {
        self.status
            .as_deref()
            .map(str::parse::<ProductStatus>)
            .transpose()
            .or_400("Invalid product")
            .map(Option::unwrap_or_default)
    }

    pub(crate) fn into_new_product(self) -> Result<NewProduct, StatusError> {
        Ok(NewProduct {
            uuid: self.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            category: self.category()?,
            status: self.status()?,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
        })
    }

    pub(crate) fn into_update(self) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            category: self.category()?,
            status: self.status()?,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
        })
    }
}
