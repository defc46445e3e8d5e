//! Sellers

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::{
    products::{Product, ProductKey},
    users::Identity,
    validation::ValidationError,
};

new_key_type! {
    /// Seller Key
    pub struct SellerKey;
}

/// A user who lists products.
///
/// The catalog holds keys into the product arena in upload order. Products are never removed.
#[derive(Debug, Clone)]
pub struct Seller {
    key: SellerKey,
    identity: Identity,
    products: Vec<ProductKey>,
}

impl Seller {
    /// Creates a seller with an empty catalog.
    pub fn new(key: SellerKey, identity: Identity) -> Self {
        Self {
            key,
            identity,
            products: Vec::new(),
        }
    }

    /// This seller's key.
    pub fn key(&self) -> SellerKey {
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

    /// Catalog in upload order.
    pub fn products(&self) -> &[ProductKey] {
        &self.products
    }

    /// Lists a new product owned by this seller.
    ///
    /// # Errors
    ///
    /// Returns the product's [`ValidationError`] unchanged; nothing is listed in that case.
    pub fn upload_product<'a>(
        &mut self,
        products: &mut SlotMap<ProductKey, Product<'a>>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<ProductKey, ValidationError> {
        let product = Product::new(name, price, quantity, self.key)?;

        debug!(
            seller = self.identity.username(),
            product = product.name(),
            quantity,
            "uploaded product"
        );

        let key = products.insert(product);
        self.products.push(key);

        Ok(key)
    }

    /// Finds the first product in the catalog whose name matches, ignoring case.
    pub fn find_product(
        &self,
        products: &SlotMap<ProductKey, Product<'_>>,
        name: &str,
    ) -> Option<ProductKey> {
        let needle = name.to_lowercase();

        self.products.iter().copied().find(|key| {
            products
                .get(*key)
                .is_some_and(|product| product.name().to_lowercase() == needle)
        })
    }

    /// Overwrites the stock of the named product.
    ///
    /// Does nothing when no product matches. Returns whether one did.
    pub fn update_product_quantity(
        &self,
        products: &mut SlotMap<ProductKey, Product<'_>>,
        name: &str,
        quantity: u32,
    ) -> bool {
        let Some(product) = self
            .find_product(products, name)
            .and_then(|key| products.get_mut(key))
        else {
            return false;
        };

        product.set_quantity(quantity);

        true
    }
}
