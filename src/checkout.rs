//! Checkout
//!
//! Checkout runs in two passes over a snapshot of the cart. The first pass checks every line
//! against live stock and prices it, collecting all shortages instead of stopping at the
//! first one. Only when every line can be satisfied does the second pass take the stock, in
//! cart order, after which the cart is cleared. A failed checkout changes nothing.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartItem},
    pricing::{TotalPriceError, line_total},
    products::{InsufficientStockError, Product, ProductKey},
    validation::ValidationError,
};

/// A cart line that current stock cannot satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortage {
    /// Product key
    pub product: ProductKey,

    /// Product name at the time of checkout
    pub name: String,

    /// Units in the cart line
    pub requested: u32,

    /// Units in stock
    pub available: u32,
}

impl fmt::Display for Shortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: insufficient stock (requested {}, available {})",
            self.name, self.requested, self.available
        )
    }
}

/// Errors that abort a checkout. None of them leave stock or the cart modified.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// One or more lines exceed current stock; every failing line is listed.
    #[error("Checkout failed:\n{}", shortage_lines(.0))]
    Shortages(SmallVec<[Shortage; 4]>),

    /// The checkout request referenced something that does not exist.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A line could not be priced.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Stock changed between the validation pass and the commit pass.
    #[error(transparent)]
    InsufficientStock(#[from] InsufficientStockError),
}

impl CheckoutError {
    /// The shortages reported by a failed validation pass, if that is what failed.
    pub fn shortages(&self) -> &[Shortage] {
        match self {
            CheckoutError::Shortages(shortages) => shortages.as_slice(),
            _ => &[],
        }
    }
}

fn shortage_lines(shortages: &[Shortage]) -> String {
    shortages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A line of a committed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    /// Product key
    pub product: ProductKey,

    /// Product name
    pub name: String,

    /// Units taken from stock
    pub quantity: u32,

    /// Price of the line when it was committed
    pub total: Money<'a, Currency>,
}

/// Summary of a committed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    lines: SmallVec<[OrderLine<'a>; 8]>,
    total: Money<'a, Currency>,
}

impl<'a> Order<'a> {
    /// Lines in cart order.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Amount charged.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Total units across all lines.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Checks out `cart` against `products`.
///
/// Returns `Ok(None)` when the cart is empty, which is not an error. On success the stock of
/// every product in the cart is reduced by its line quantity and the cart is emptied.
///
/// # Errors
///
/// - [`CheckoutError::Shortages`]: at least one line exceeds current stock.
/// - [`CheckoutError::TotalPrice`]: a line references a missing product or can't be priced.
///
/// In both cases neither `cart` nor `products` is modified.
pub fn checkout<'a>(
    cart: &mut Cart,
    products: &mut SlotMap<ProductKey, Product<'a>>,
) -> Result<Option<Order<'a>>, CheckoutError> {
    if cart.is_empty() {
        debug!("cart is empty, nothing to check out");

        return Ok(None);
    }

    let snapshot: SmallVec<[CartItem; 8]> = cart.iter().copied().collect();

    let (lines, shortages) = validate(&snapshot, products)?;

    if !shortages.is_empty() {
        warn!(shortages = shortages.len(), "checkout rejected");

        return Err(CheckoutError::Shortages(shortages));
    }

    let total = lines
        .iter()
        .try_fold(Money::from_minor(0, cart.currency()), |acc, line| {
            acc.add(line.total)
        })
        .map_err(TotalPriceError::from)?;

    // Lines are unique per product (see `Cart::add`), so each reduction here was validated
    // against the same stock it now draws from and none of them can fail.
    debug_assert!(
        snapshot.iter().enumerate().all(|(i, item)| {
            snapshot
                .iter()
                .skip(i + 1)
                .all(|other| other.product() != item.product())
        }),
        "cart holds more than one line for a product"
    );

    for item in &snapshot {
        products
            .get_mut(item.product())
            .ok_or(TotalPriceError::MissingProduct(item.product()))?
            .reduce_quantity(item.quantity())?;
    }

    cart.clear();

    let order = Order { lines, total };

    info!(lines = order.lines.len(), units = order.units(), total = %order.total, "checkout committed");

    Ok(Some(order))
}

type Validated<'a> = (SmallVec<[OrderLine<'a>; 8]>, SmallVec<[Shortage; 4]>);

fn validate<'a>(
    snapshot: &[CartItem],
    products: &SlotMap<ProductKey, Product<'a>>,
) -> Result<Validated<'a>, TotalPriceError> {
    let mut lines = SmallVec::new();
    let mut shortages = SmallVec::new();

    for item in snapshot {
        let key = item.product();
        let product = products
            .get(key)
            .ok_or(TotalPriceError::MissingProduct(key))?;

        if product.is_available(item.quantity()) {
            lines.push(OrderLine {
                product: key,
                name: product.name().to_string(),
                quantity: item.quantity(),
                total: line_total(product, item.quantity())?,
            });
        } else {
            shortages.push(Shortage {
                product: key,
                name: product.name().to_string(),
                requested: item.quantity(),
                available: product.quantity(),
            });
        }
    }

    Ok((lines, shortages))
}
