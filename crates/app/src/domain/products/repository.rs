//! Products Repository

use jiff::Timestamp;

use crate::{
    database::Tables,
    domain::products::{
        data::{NewProduct, ProductQuery, ProductSort, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct ProductsRepository;

impl ProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn list_products(&self, tx: &Tables, query: &ProductQuery) -> Vec<ProductRecord> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<ProductRecord> = tx
            .products
            .values()
            .filter(|product| query.category.is_none_or(|category| product.category == category))
            .filter(|product| query.status.is_none_or(|status| product.status == status))
            .filter(|product| query.min_price.is_none_or(|min| product.price >= min))
            .filter(|product| query.max_price.is_none_or(|max| product.price <= max))
            .filter(|product| !query.in_stock || product.stock > 0)
            .filter(|product| {
                search.as_deref().is_none_or(|term| {
                    product.name.to_lowercase().contains(term)
                        || product.description.to_lowercase().contains(term)
                })
            })
            .cloned()
            .collect();

        sort_products(&mut products, query.sort);

        products
    }

    pub(crate) fn get_product(
        &self,
        tx: &Tables,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        tx.products
            .get(&product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    pub(crate) fn create_product(
        &self,
        tx: &mut Tables,
        product: NewProduct,
        now: Timestamp,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if tx.products.contains_key(&product.uuid) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let record = ProductRecord {
            uuid: product.uuid,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock: product.stock,
            image: product.image,
            status: product.status,
            created_at: now,
            updated_at: now,
        };

        tx.products.insert(record.uuid, record.clone());

        Ok(record)
    }

    pub(crate) fn update_product(
        &self,
        tx: &mut Tables,
        product: ProductUuid,
        update: ProductUpdate,
        now: Timestamp,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let record = tx
            .products
            .get_mut(&product)
            .ok_or(ProductsServiceError::NotFound)?;

        record.name = update.name;
        record.description = update.description;
        record.price = update.price;
        record.category = update.category;
        record.stock = update.stock;
        record.image = update.image;
        record.status = update.status;
        record.updated_at = now;

        Ok(record.clone())
    }

    pub(crate) fn delete_product(&self, tx: &mut Tables, product: ProductUuid) -> u64 {
        u64::from(tx.products.remove(&product).is_some())
    }
}

fn sort_products(products: &mut [ProductRecord], sort: ProductSort) {
    match sort {
        ProductSort::Newest => products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        }),
        ProductSort::PriceAsc => {
            products.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        }
        ProductSort::PriceDesc => {
            products.sort_by(|a, b| b.price.cmp(&a.price).then_with(|| a.name.cmp(&b.name)));
        }
        ProductSort::NameAsc => products.sort_by_cached_key(|product| product.name.to_lowercase()),
        ProductSort::NameDesc => {
            products.sort_by_cached_key(|product| product.name.to_lowercase());
            products.reverse();
        }
    }
}
