//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::CartItem,
    products::{Product, ProductKey},
};

/// Errors that can occur while calculating a total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A cart line references a product that is not listed.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// The line total does not fit in minor units.
    #[error("line total overflow")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at the product's current price.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total<'a>(
    product: &Product<'a>,
    quantity: u32,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let price = product.price();

    let minor_units = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor_units, price.currency()))
}

/// Price of a cart line at the product's current price.
///
/// # Errors
///
/// - [`TotalPriceError::MissingProduct`]: the line's product is not in `products`.
/// - [`TotalPriceError::Overflow`]: the result does not fit in minor units.
pub fn item_total<'a>(
    item: &CartItem,
    products: &SlotMap<ProductKey, Product<'a>>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let product = products
        .get(item.product())
        .ok_or(TotalPriceError::MissingProduct(item.product()))?;

    line_total(product, item.quantity())
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::MissingProduct`]: a line's product is not in `products`.
/// - [`TotalPriceError::Overflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[CartItem],
    products: &SlotMap<ProductKey, Product<'a>>,
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(
            Money::from_minor(0, currency),
            |acc, item| -> Result<_, TotalPriceError> {
                Ok(acc.add(item_total(item, products)?)?)
            },
        )
}
