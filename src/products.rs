//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::{
    sellers::SellerKey,
    validation::{ValidationError, validate_product_name, validate_quantity},
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A request exceeded the stock currently on hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{product}: insufficient stock (requested {requested}, available {available})")]
pub struct InsufficientStockError {
    /// Product name
    pub product: String,

    /// Units asked for
    pub requested: u32,

    /// Units on hand when the request was checked
    pub available: u32,
}

/// A listed product.
///
/// Equality compares name, price and seller. Stock is left out so a product stays the same
/// product while it sells.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    name: String,
    price: Money<'a, Currency>,
    quantity: u32,
    seller: SellerKey,
}

impl<'a> Product<'a> {
    /// Creates a new product with some stock.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is blank, the price is not positive, or the
    /// quantity is zero.
    pub fn new(
        name: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: u32,
        seller: SellerKey,
    ) -> Result<Self, ValidationError> {
        let name = name.into();

        validate_product_name(&name)?;
        validate_price(&price)?;
        validate_quantity(quantity)?;

        Ok(Self {
            name,
            price,
            quantity,
            seller,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Units in stock
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Owning seller
    pub fn seller(&self) -> SellerKey {
        self.seller
    }

    /// Renames the product.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyProductName`] if `name` is blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();

        validate_product_name(&name)?;
        self.name = name;

        Ok(())
    }

    /// Reprices the product.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositivePrice`] if `price` is zero or negative.
    pub fn set_price(&mut self, price: Money<'a, Currency>) -> Result<(), ValidationError> {
        validate_price(&price)?;
        self.price = price;

        Ok(())
    }

    /// Overwrites the stock level. Zero is allowed once the product is listed.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Whether `requested` units can be taken from stock right now.
    ///
    /// A request for zero units is never available.
    pub fn is_available(&self, requested: u32) -> bool {
        requested > 0 && requested <= self.quantity
    }

    /// Takes `amount` units out of stock.
    ///
    /// # Errors
    ///
    /// Returns an [`InsufficientStockError`] and leaves stock untouched unless
    /// [`Product::is_available`] holds for `amount`.
    pub fn reduce_quantity(&mut self, amount: u32) -> Result<(), InsufficientStockError> {
        if !self.is_available(amount) {
            return Err(self.shortage(amount));
        }

        self.quantity -= amount;

        Ok(())
    }

    /// Puts `amount` units back into stock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroQuantity`] for a zero amount and
    /// [`ValidationError::QuantityOverflow`] if stock would overflow.
    pub fn increase_quantity(&mut self, amount: u32) -> Result<(), ValidationError> {
        validate_quantity(amount)?;

        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or(ValidationError::QuantityOverflow)?;

        Ok(())
    }

    /// Describes a request for `requested` units against current stock.
    pub fn shortage(&self, requested: u32) -> InsufficientStockError {
        InsufficientStockError {
            product: self.name.clone(),
            requested,
            available: self.quantity,
        }
    }
}

impl PartialEq for Product<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.price == other.price && self.seller == other.seller
    }
}

fn validate_price(price: &Money<'_, Currency>) -> Result<(), ValidationError> {
    if price.to_minor_units() <= 0 {
        return Err(ValidationError::NonPositivePrice);
    }

    Ok(())
}
