//! Buyers

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    checkout::{self, CheckoutError, Order},
    pricing::TotalPriceError,
    products::{Product, ProductKey},
    sellers::Seller,
    users::Identity,
};

new_key_type! {
    /// Buyer Key
    pub struct BuyerKey;
}

/// A user who shops.
#[derive(Debug, Clone)]
pub struct Buyer {
    key: BuyerKey,
    identity: Identity,
    cart: Cart,
}

impl Buyer {
    /// Creates a buyer with an empty cart priced in `currency`.
    pub fn new(key: BuyerKey, identity: Identity, currency: &'static Currency) -> Self {
        Self {
            key,
            identity,
            cart: Cart::new(currency),
        }
    }

    /// This buyer's key.
    pub fn key(&self) -> BuyerKey {
        self.key
    }

    /// Username and email.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Username and email, for the validated setters.
    pub fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    /// The pending cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Records intent to buy `quantity` units of `product`. Stock is checked, not reserved.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`]: unknown product or zero quantity.
    /// - [`CartError::InsufficientStock`]: the request, or the merged cart line, exceeds stock.
    pub fn add_to_cart(
        &mut self,
        products: &SlotMap<ProductKey, Product<'_>>,
        product: ProductKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.cart.add(products, product, quantity)?;

        debug!(
            buyer = self.identity.username(),
            product = ?product,
            quantity,
            "added to cart"
        );

        Ok(())
    }

    /// Checks out the whole cart against live stock.
    ///
    /// Returns `Ok(None)` if the cart was empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] listing every line that can't be satisfied. Nothing changes in
    /// that case.
    #[tracing::instrument(skip_all, fields(buyer = self.identity.username()))]
    pub fn checkout<'a>(
        &mut self,
        products: &mut SlotMap<ProductKey, Product<'a>>,
    ) -> Result<Option<Order<'a>>, CheckoutError> {
        checkout::checkout(&mut self.cart, products)
    }

    /// Empties the cart without touching stock.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Live total of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a product is missing or money arithmetic fails.
    pub fn cart_total<'a>(
        &self,
        products: &SlotMap<ProductKey, Product<'a>>,
    ) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.cart.total(products)
    }
}

/// Products that can be bought right now, in seller order and then catalog order.
pub fn browse_products<'s>(
    sellers: impl IntoIterator<Item = &'s Seller>,
    products: &SlotMap<ProductKey, Product<'_>>,
) -> Vec<ProductKey> {
    sellers
        .into_iter()
        .flat_map(Seller::products)
        .copied()
        .filter(|key| products.get(*key).is_some_and(|product| product.quantity() > 0))
        .collect()
}
