//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductQuery, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::ProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct InMemoryProductsService {
    db: Db,
    repository: ProductsRepository,
}

impl InMemoryProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: ProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for InMemoryProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Err(ProductsServiceError::InvalidData(
                "min_price must not exceed max_price",
            ));
        }

        let tx = self.db.read().await;

        Ok(self.repository.list_products(&tx, &query))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let tx = self.db.read().await;

        self.repository.get_product(&tx, product)
    }

    #[tracing::instrument(
        name = "products.service.create",
        skip(self, product),
        fields(product_uuid = %product.uuid),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = NewProduct {
            name: required(product.name, "name")?,
            image: required(product.image, "image")?,
            price: storable_price(product.price)?,
            ..product
        };

        let mut tx = self.db.begin().await;

        self.repository
            .create_product(&mut tx, product, Timestamp::now())
    }

    #[tracing::instrument(name = "products.service.update", skip(self, update), err)]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = ProductUpdate {
            name: required(update.name, "name")?,
            image: required(update.image, "image")?,
            price: storable_price(update.price)?,
            ..update
        };

        let mut tx = self.db.begin().await;

        self.repository
            .update_product(&mut tx, product, update, Timestamp::now())
    }

    #[tracing::instrument(name = "products.service.delete", skip(self), err)]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await;

        let rows_affected = self.repository.delete_product(&mut tx, product);

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

fn required(value: String, field: &'static str) -> Result<String, ProductsServiceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData(field));
    }

    Ok(trimmed.to_owned())
}

/// Prices must fit in signed minor units so cart and order totals can be computed.
fn storable_price(price: u64) -> Result<u64, ProductsServiceError> {
    i64::try_from(price)
        .map(|_| price)
        .map_err(|_overflow| ProductsServiceError::InvalidData("price is out of range"))
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the products matching `query`, in the requested order.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the editable fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes a product from the catalog.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{
            data::ProductSort,
            records::{ProductCategory, ProductStatus},
        },
        test::{TestContext, new_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_created_record() -> TestResult {
        let ctx = TestContext::new();
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(new_product(uuid, "Round Diamond", 999))
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 999);
        assert_eq!(product.name, "Round Diamond");
        assert_eq!(product.created_at, product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_trims_and_requires_name() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .create_product(new_product(ProductUuid::new(), "   ", 100))
            .await;

        assert_eq!(result, Err(ProductsServiceError::MissingRequiredData("name")));

        let product = ctx
            .products
            .create_product(new_product(ProductUuid::new(), "  Opal  ", 100))
            .await?;

        assert_eq!(product.name, "Opal");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_image() {
        let ctx = TestContext::new();

        let mut product = new_product(ProductUuid::new(), "Opal", 100);

        product.image = String::new();

        let result = ctx.products.create_product(product).await;

        assert_eq!(result, Err(ProductsServiceError::MissingRequiredData("image")));
    }

    #[tokio::test]
    async fn create_product_rejects_price_beyond_minor_units() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .create_product(new_product(ProductUuid::new(), "Cursed Opal", u64::MAX))
            .await;

        assert_eq!(result, Err(ProductsServiceError::InvalidData("price is out of range")));
        assert!(ctx.products.list_products(ProductQuery::default()).await?.is_empty());

        let largest = i64::MAX.unsigned_abs();

        let product = ctx
            .products
            .create_product(new_product(ProductUuid::new(), "Star of India", largest))
            .await?;

        assert_eq!(product.price, largest);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_rejects_price_beyond_minor_units() -> TestResult {
        let ctx = TestContext::new();
        let uuid = ProductUuid::new();

        let original = ctx
            .products
            .create_product(new_product(uuid, "Ruby", 500))
            .await?;

        let update = ProductUpdate {
            name: original.name.clone(),
            description: original.description.clone(),
            price: u64::MAX,
            category: original.category,
            stock: original.stock,
            image: original.image.clone(),
            status: original.status,
        };

        let result = ctx.products.update_product(uuid, update).await;

        assert_eq!(result, Err(ProductsServiceError::InvalidData("price is out of range")));
        assert_eq!(ctx.products.get_product(uuid).await?, original);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new();
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(new_product(uuid, "Ruby", 100))
            .await?;

        let result = ctx
            .products
            .create_product(new_product(uuid, "Ruby", 200))
            .await;

        assert_eq!(result, Err(ProductsServiceError::AlreadyExists));

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert_eq!(result, Err(ProductsServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_product_replaces_fields() -> TestResult {
        let ctx = TestContext::new();
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(new_product(uuid, "Ruby", 500))
            .await?;

        let updated = ctx
            .products
            .update_product(
                uuid,
                ProductUpdate {
                    name: "Pigeon Blood Ruby".to_owned(),
                    description: "Burmese".to_owned(),
                    price: 750,
                    category: ProductCategory::Rubies,
                    stock: 0,
                    image: "/images/ruby.jpg".to_owned(),
                    status: ProductStatus::Inactive,
                },
            )
            .await?;

        assert_eq!(updated.uuid, uuid);
        assert_eq!(updated.price, 750);
        assert_eq!(updated.status, ProductStatus::Inactive);
        assert_eq!(ctx.products.get_product(uuid).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let update = ProductUpdate {
            name: "Ruby".to_owned(),
            description: String::new(),
            price: 100,
            category: ProductCategory::Rubies,
            stock: 1,
            image: "/images/ruby.jpg".to_owned(),
            status: ProductStatus::Active,
        };

        let result = ctx.products.update_product(ProductUuid::new(), update).await;

        assert_eq!(result, Err(ProductsServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new();
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(new_product(uuid, "Pearl", 300))
            .await?;

        ctx.products.delete_product(uuid).await?;

        assert_eq!(
            ctx.products.get_product(uuid).await,
            Err(ProductsServiceError::NotFound)
        );
        assert_eq!(
            ctx.products.delete_product(uuid).await,
            Err(ProductsServiceError::NotFound)
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_and_sorts() -> TestResult {
        let ctx = TestContext::new();

        let mut sapphire = new_product(ProductUuid::new(), "Blue Sapphire", 3_000);
        sapphire.category = ProductCategory::Sapphires;

        let mut pink = new_product(ProductUuid::new(), "Pink Sapphire", 1_500);
        pink.category = ProductCategory::Sapphires;
        pink.stock = 0;

        let mut pearl = new_product(ProductUuid::new(), "Tahitian Pearl", 900);
        pearl.category = ProductCategory::Pearls;
        pearl.description = "Black pearl with sapphire sheen".to_owned();

        for product in [sapphire, pink.clone(), pearl] {
            ctx.products.create_product(product).await?;
        }

        let by_category = ctx
            .products
            .list_products(ProductQuery {
                category: Some(ProductCategory::Sapphires),
                sort: ProductSort::PriceAsc,
                ..ProductQuery::default()
            })
            .await?;

        let names: Vec<&str> = by_category.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["Pink Sapphire", "Blue Sapphire"]);

        let searched = ctx
            .products
            .list_products(ProductQuery {
                search: Some("SAPPHIRE".to_owned()),
                in_stock: true,
                sort: ProductSort::NameDesc,
                ..ProductQuery::default()
            })
            .await?;

        let names: Vec<&str> = searched.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["Tahitian Pearl", "Blue Sapphire"]);

        let priced = ctx
            .products
            .list_products(ProductQuery {
                min_price: Some(1_000),
                max_price: Some(2_000),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(priced.len(), 1);
        assert_eq!(priced.first().map(|p| p.uuid), Some(pink.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_newest_first_by_default() -> TestResult {
        let ctx = TestContext::new();

        let first = ProductUuid::new();
        let second = ProductUuid::new();

        ctx.products
            .create_product(new_product(first, "Emerald", 100))
            .await?;
        ctx.products
            .create_product(new_product(second, "Opal", 100))
            .await?;

        let products = ctx.products.list_products(ProductQuery::default()).await?;
        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, [second, first]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_rejects_inverted_price_range() {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .list_products(ProductQuery {
                min_price: Some(500),
                max_price: Some(100),
                ..ProductQuery::default()
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }
}
