//! Carts service.

use async_trait::async_trait;
use gemstore::basket::QuantityChange;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::UserUuid,
    database::{Db, Tables},
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            models::Cart,
            records::{CartItemDetails, CartRecord},
            repository::{CartsRepository, to_cart},
        },
        pricing::Pricing,
        products::{ProductsServiceError, records::ProductUuid, repository::ProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct InMemoryCartsService {
    db: Db,
    pricing: Pricing,
    carts_repository: CartsRepository,
    products_repository: ProductsRepository,
}

impl InMemoryCartsService {
    #[must_use]
    pub fn new(db: Db, pricing: Pricing) -> Self {
        Self {
            db,
            pricing,
            carts_repository: CartsRepository::new(),
            products_repository: ProductsRepository::new(),
        }
    }

    /// Render `cart` and store it. A cart whose totals cannot be computed is not stored.
    fn commit(&self, tx: &mut Tables, cart: CartRecord) -> Result<Cart, CartsServiceError> {
        let rendered = to_cart(cart.user, Some(&cart), &self.pricing).map_err(|error| {
            if error.is_out_of_range() {
                CartsServiceError::TotalOutOfRange
            } else {
                CartsServiceError::Totals(error)
            }
        })?;

        self.carts_repository.save_cart(tx, cart);

        Ok(rendered)
    }
}

#[async_trait]
impl CartsService for InMemoryCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let tx = self.db.read().await;

        let cart = self.carts_repository.get_cart(&tx, user);

        Ok(to_cart(user, cart, &self.pricing)?)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(product_uuid = %item.product_uuid, quantity = item.quantity),
        err
    )]
    async fn add_item(&self, user: UserUuid, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        let quantity = positive_quantity(item.quantity)?;

        let mut tx = self.db.begin().await;

        let product = self
            .products_repository
            .get_product(&tx, item.product_uuid)
            .map_err(|error| match error {
                ProductsServiceError::NotFound => CartsServiceError::ProductNotFound,
                _ => CartsServiceError::ProductUnavailable,
            })?;

        if !product.is_purchasable() {
            return Err(CartsServiceError::ProductUnavailable);
        }

        let unit_price = self.pricing.money(product.price)?;
        let now = Timestamp::now();

        let mut cart = self
            .carts_repository
            .draft_cart(&tx, user, &self.pricing, now);

        cart.lines.add(product.uuid, unit_price, quantity)?;

        cart.details
            .entry(product.uuid)
            .or_insert_with(|| CartItemDetails {
                name: product.name,
                image: product.image,
            });

        cart.updated_at = now;

        self.commit(&mut tx, cart)
    }

    #[tracing::instrument(name = "carts.service.update_item", skip(self), err)]
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await;

        let Some(mut cart) = self.carts_repository.get_cart(&tx, user).cloned() else {
            return Ok(to_cart(user, None, &self.pricing)?);
        };

        match cart.lines.set_quantity(&product, quantity)? {
            QuantityChange::Updated => cart.updated_at = Timestamp::now(),
            QuantityChange::Removed => {
                cart.details.remove(&product);
                cart.updated_at = Timestamp::now();
            }
            QuantityChange::Unchanged => {
                debug!("product not in cart; nothing to update");

                return Ok(to_cart(user, Some(&cart), &self.pricing)?);
            }
        }

        self.commit(&mut tx, cart)
    }

    #[tracing::instrument(name = "carts.service.remove_item", skip(self), err)]
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await;

        let Some(cart) = self.carts_repository.get_cart_mut(&mut tx, user) else {
            return Ok(to_cart(user, None, &self.pricing)?);
        };

        if cart.lines.remove(&product) {
            cart.details.remove(&product);
            cart.updated_at = Timestamp::now();
        }

        Ok(to_cart(user, Some(cart), &self.pricing)?)
    }

    #[tracing::instrument(name = "carts.service.clear", skip(self), err)]
    async fn clear_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await;

        self.carts_repository.delete_cart(&mut tx, user);

        Ok(to_cart(user, None, &self.pricing)?)
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or(CartsServiceError::InvalidQuantity)
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart. Users without one get an empty cart.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product, snapshotting its name, price and image on first add.
    async fn add_item(&self, user: UserUuid, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Set a line's quantity; below one removes it.
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;
}
