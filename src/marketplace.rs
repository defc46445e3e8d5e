//! Marketplace
//!
//! The directory of sellers and buyers, the arena every product lives in, and the procedural
//! API a presentation layer calls. Mutating calls take `&mut self`, so only one caller can touch
//! stock or carts at a time.

use rusty_money::{
    Money,
    iso::{Currency, PHP},
};
use slotmap::SlotMap;
use tracing::debug;

use crate::{
    buyers::{self, Buyer, BuyerKey},
    cart::CartError,
    checkout::{CheckoutError, Order},
    dashboard::{Dashboard, DashboardError},
    prices::price_from_f64,
    products::{Product, ProductKey},
    sellers::{Seller, SellerKey},
    users::{Identity, User, UserKind},
    validation::ValidationError,
};

/// All users and products, priced in a single currency.
#[derive(Debug)]
pub struct Marketplace<'a> {
    currency: &'static Currency,
    products: SlotMap<ProductKey, Product<'a>>,
    sellers: SlotMap<SellerKey, Seller>,
    buyers: SlotMap<BuyerKey, Buyer>,
    seller_order: Vec<SellerKey>,
    buyer_order: Vec<BuyerKey>,
}

impl<'a> Marketplace<'a> {
    /// Create an empty marketplace priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            products: SlotMap::with_key(),
            sellers: SlotMap::with_key(),
            buyers: SlotMap::with_key(),
            seller_order: Vec::new(),
            buyer_order: Vec::new(),
        }
    }

    /// Create an empty marketplace priced in Philippine pesos.
    #[must_use]
    pub fn with_default_currency() -> Self {
        Self::new(PHP)
    }

    /// The marketplace currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Registers a seller or buyer. Username and email are trimmed first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the username or email is invalid.
    pub fn create_user(
        &mut self,
        kind: UserKind,
        username: &str,
        email: &str,
    ) -> Result<User, ValidationError> {
        match kind {
            UserKind::Seller => self.register_seller(username, email).map(User::Seller),
            UserKind::Buyer => self.register_buyer(username, email).map(User::Buyer),
        }
    }

    /// Registers a seller with an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the username or email is invalid.
    pub fn register_seller(
        &mut self,
        username: &str,
        email: &str,
    ) -> Result<SellerKey, ValidationError> {
        let identity = Identity::new(username.trim(), email.trim())?;

        debug!(username = identity.username(), "registered seller");

        let key = self
            .sellers
            .insert_with_key(|key| Seller::new(key, identity));
        self.seller_order.push(key);

        Ok(key)
    }

    /// Registers a buyer with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the username or email is invalid.
    pub fn register_buyer(&mut self, username: &str, email: &str) -> Result<BuyerKey, ValidationError> {
        let identity = Identity::new(username.trim(), email.trim())?;
        let currency = self.currency;

        debug!(username = identity.username(), "registered buyer");

        let key = self
            .buyers
            .insert_with_key(|key| Buyer::new(key, identity, currency));
        self.buyer_order.push(key);

        Ok(key)
    }

    /// Lists a product for `seller` at `price` major units of the marketplace currency.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the seller is unknown or the product is invalid.
    pub fn upload_product(
        &mut self,
        seller: SellerKey,
        name: &str,
        price: f64,
        quantity: u32,
    ) -> Result<ProductKey, ValidationError> {
        let price = price_from_f64(price, self.currency)?;

        self.upload_product_priced(seller, name, price, quantity)
    }

    /// Lists a product for `seller` at an exact price in the marketplace currency.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the seller is unknown, the price is in another currency or
    /// the product is invalid.
    pub fn upload_product_priced(
        &mut self,
        seller: SellerKey,
        name: &str,
        price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<ProductKey, ValidationError> {
        if price.currency() != self.currency {
            return Err(ValidationError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code.to_string(),
                actual: price.currency().iso_alpha_code.to_string(),
            });
        }

        self.sellers
            .get_mut(seller)
            .ok_or(ValidationError::UnknownSeller(seller))?
            .upload_product(&mut self.products, name, price, quantity)
    }

    /// Adds `quantity` units of `product` to the buyer's cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`]: unknown buyer or product, or zero quantity.
    /// - [`CartError::InsufficientStock`]: not enough stock for the request or the merged line.
    pub fn add_to_cart(
        &mut self,
        buyer: BuyerKey,
        product: ProductKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.buyers
            .get_mut(buyer)
            .ok_or(ValidationError::UnknownBuyer(buyer))?
            .add_to_cart(&self.products, product, quantity)
    }

    /// Checks out the buyer's cart.
    ///
    /// Returns `Ok(None)` if the cart was empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for an unknown buyer or when any line exceeds stock.
    pub fn checkout(&mut self, buyer: BuyerKey) -> Result<Option<Order<'a>>, CheckoutError> {
        self.buyers
            .get_mut(buyer)
            .ok_or(ValidationError::UnknownBuyer(buyer))?
            .checkout(&mut self.products)
    }

    /// Empties the buyer's cart.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownBuyer`] if the buyer is not registered.
    pub fn clear_cart(&mut self, buyer: BuyerKey) -> Result<(), ValidationError> {
        self.buyers
            .get_mut(buyer)
            .ok_or(ValidationError::UnknownBuyer(buyer))?
            .clear_cart();

        Ok(())
    }

    /// In-stock products across every seller, in registration order then catalog order.
    pub fn browse_products(&self) -> Vec<ProductKey> {
        buyers::browse_products(self.sellers(), &self.products)
    }

    /// Renders the dashboard of `user`.
    ///
    /// # Errors
    ///
    /// Returns a [`DashboardError`] if the user or anything it references is missing.
    pub fn dashboard(&self, user: User) -> Result<String, DashboardError> {
        match user {
            User::Seller(key) => self
                .seller(key)
                .ok_or(DashboardError::MissingSeller(key))?
                .dashboard(self),
            User::Buyer(key) => self
                .buyer(key)
                .ok_or(DashboardError::MissingBuyer(key))?
                .dashboard(self),
        }
    }

    /// Puts `amount` units of `product` back into stock.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown product, a zero amount or overflow.
    pub fn restock(&mut self, product: ProductKey, amount: u32) -> Result<(), ValidationError> {
        self.products
            .get_mut(product)
            .ok_or(ValidationError::UnknownProduct(product))?
            .increase_quantity(amount)
    }

    /// Reprices `product` at `price` major units of the marketplace currency.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown product or an invalid price.
    pub fn set_product_price(
        &mut self,
        product: ProductKey,
        price: f64,
    ) -> Result<(), ValidationError> {
        let price = price_from_f64(price, self.currency)?;

        self.products
            .get_mut(product)
            .ok_or(ValidationError::UnknownProduct(product))?
            .set_price(price)
    }

    /// Renames `product`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown product or a blank name.
    pub fn rename_product(&mut self, product: ProductKey, name: &str) -> Result<(), ValidationError> {
        self.products
            .get_mut(product)
            .ok_or(ValidationError::UnknownProduct(product))?
            .set_name(name)
    }

    /// Finds a product in the seller's catalog by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSeller`] if the seller is not registered.
    pub fn find_product(
        &self,
        seller: SellerKey,
        name: &str,
    ) -> Result<Option<ProductKey>, ValidationError> {
        Ok(self
            .seller(seller)
            .ok_or(ValidationError::UnknownSeller(seller))?
            .find_product(&self.products, name))
    }

    /// Overwrites the stock of a named product in the seller's catalog.
    ///
    /// Returns whether a product matched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSeller`] if the seller is not registered.
    pub fn update_product_quantity(
        &mut self,
        seller: SellerKey,
        name: &str,
        quantity: u32,
    ) -> Result<bool, ValidationError> {
        Ok(self
            .sellers
            .get(seller)
            .ok_or(ValidationError::UnknownSeller(seller))?
            .update_product_quantity(&mut self.products, name, quantity))
    }

    /// First registered user with `username`, sellers before buyers.
    pub fn user(&self, username: &str) -> Option<User> {
        self.users().find(|user| {
            self.identity(*user)
                .is_some_and(|identity| identity.username() == username)
        })
    }

    /// Every user, sellers then buyers, each in registration order.
    pub fn users(&self) -> impl Iterator<Item = User> + '_ {
        self.seller_order
            .iter()
            .copied()
            .map(User::Seller)
            .chain(self.buyer_order.iter().copied().map(User::Buyer))
    }

    /// Username and email of `user`.
    pub fn identity(&self, user: User) -> Option<&Identity> {
        match user {
            User::Seller(key) => self.seller(key).map(Seller::identity),
            User::Buyer(key) => self.buyer(key).map(Buyer::identity),
        }
    }

    /// Sellers in registration order.
    pub fn sellers(&self) -> impl Iterator<Item = &Seller> + '_ {
        self.seller_order
            .iter()
            .filter_map(|key| self.sellers.get(*key))
    }

    /// Buyers in registration order.
    pub fn buyers(&self) -> impl Iterator<Item = &Buyer> + '_ {
        self.buyer_order
            .iter()
            .filter_map(|key| self.buyers.get(*key))
    }

    /// Get a seller by key.
    pub fn seller(&self, key: SellerKey) -> Option<&Seller> {
        self.sellers.get(key)
    }

    /// Get a seller by key, mutably.
    pub fn seller_mut(&mut self, key: SellerKey) -> Option<&mut Seller> {
        self.sellers.get_mut(key)
    }

    /// Get a buyer by key.
    pub fn buyer(&self, key: BuyerKey) -> Option<&Buyer> {
        self.buyers.get(key)
    }

    /// Get a buyer by key, mutably.
    pub fn buyer_mut(&mut self, key: BuyerKey) -> Option<&mut Buyer> {
        self.buyers.get_mut(key)
    }

    /// Get a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// The product arena.
    pub fn products(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.products
    }
}
