//! Cart

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, total_price},
    products::{InsufficientStockError, Product, ProductKey},
    validation::{ValidationError, validate_quantity},
};

/// Errors from adding to a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The request itself was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Not enough stock for the request.
    #[error(transparent)]
    InsufficientStock(#[from] InsufficientStockError),
}

/// One cart line: a product and how many units of it are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    product: ProductKey,
    quantity: u32,
}

impl CartItem {
    /// Creates a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(product: ProductKey, quantity: u32) -> Result<Self, ValidationError> {
        validate_quantity(quantity)?;

        Ok(Self { product, quantity })
    }

    /// The product on this line
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Units wanted
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Changes the units wanted. A line can't be reduced to zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroQuantity`] if `quantity` is zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;

        Ok(())
    }
}

/// A buyer's pending selection.
///
/// Lines keep the order they were first added in and there is at most one line per product.
/// Adding only records intent; stock is checked but never reserved.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Adds `quantity` units of the product at `key`, merging with an existing line for the
    /// same key.
    ///
    /// The merged quantity must still fit in the product's current stock.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`]: `key` is not in `products`, or `quantity` is zero.
    /// - [`CartError::InsufficientStock`]: the request, or the merged line, exceeds stock. The
    ///   cart is left unchanged.
    pub fn add(
        &mut self,
        products: &SlotMap<ProductKey, Product<'_>>,
        key: ProductKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        let product = products
            .get(key)
            .ok_or(ValidationError::UnknownProduct(key))?;

        validate_quantity(quantity)?;

        if !product.is_available(quantity) {
            return Err(product.shortage(quantity).into());
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.product == key) {
            let merged = line
                .quantity
                .checked_add(quantity)
                .filter(|merged| product.is_available(*merged))
                .ok_or_else(|| product.shortage(line.quantity.saturating_add(quantity)))?;

            line.set_quantity(merged)?;
        } else {
            self.items.push(CartItem::new(key, quantity)?);
        }

        Ok(())
    }

    /// The line for `key`, if there is one.
    pub fn get_item(&self, key: ProductKey) -> Option<&CartItem> {
        self.items.iter().find(|line| line.product == key)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Calculate the live total of the cart, at current product prices.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a product is missing or money arithmetic fails.
    pub fn total<'a>(
        &self,
        products: &SlotMap<ProductKey, Product<'a>>,
    ) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.items, products, self.currency)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
