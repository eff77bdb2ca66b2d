//! Carts Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{
    auth::UserUuid,
    database::Tables,
    domain::{
        carts::{
            models::{Cart, CartItem},
            records::CartRecord,
        },
        pricing::{Pricing, TotalsError, minor_units},
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartsRepository;

impl CartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_cart<'t>(&self, tx: &'t Tables, user: UserUuid) -> Option<&'t CartRecord> {
        tx.carts.get(&user)
    }

    pub(crate) fn get_cart_mut<'t>(
        &self,
        tx: &'t mut Tables,
        user: UserUuid,
    ) -> Option<&'t mut CartRecord> {
        tx.carts.get_mut(&user)
    }

    /// A working copy of the user's cart, or a fresh empty cart on first use.
    ///
    /// Nothing is stored until the copy is passed to [`CartsRepository::save_cart`].
    pub(crate) fn draft_cart(
        &self,
        tx: &Tables,
        user: UserUuid,
        pricing: &Pricing,
        now: Timestamp,
    ) -> CartRecord {
        tx.carts.get(&user).cloned().unwrap_or_else(|| CartRecord {
            user,
            lines: pricing.basket(),
            details: FxHashMap::default(),
            updated_at: now,
        })
    }

    pub(crate) fn save_cart(&self, tx: &mut Tables, cart: CartRecord) {
        tx.carts.insert(cart.user, cart);
    }

    pub(crate) fn delete_cart(&self, tx: &mut Tables, user: UserUuid) -> Option<CartRecord> {
        tx.carts.remove(&user)
    }
}

/// Render a cart record, or an empty cart, with its totals.
pub(crate) fn to_cart(
    user: UserUuid,
    record: Option<&CartRecord>,
    pricing: &Pricing,
) -> Result<Cart, TotalsError> {
    let Some(record) = record else {
        return Ok(Cart {
            user,
            items: Vec::new(),
            totals: pricing.totals(&pricing.basket::<()>())?,
            updated_at: None,
        });
    };

    let items = record
        .lines
        .lines()
        .iter()
        .map(|line| {
            let details = record.details.get(line.key());

            Ok(CartItem {
                product_uuid: *line.key(),
                name: details.map(|d| d.name.clone()).unwrap_or_default(),
                price: minor_units(line.unit_price())?,
                quantity: line.quantity(),
                image: details.map(|d| d.image.clone()).unwrap_or_default(),
                line_total: minor_units(&line.total()?)?,
            })
        })
        .collect::<Result<Vec<_>, TotalsError>>()?;

    Ok(Cart {
        user,
        items,
        totals: pricing.totals(&record.lines)?,
        updated_at: Some(record.updated_at),
    })
}
