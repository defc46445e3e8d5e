//! Validation

use thiserror::Error;

use crate::{buyers::BuyerKey, products::ProductKey, sellers::SellerKey};

/// Minimum length of a trimmed username.
pub const MIN_USERNAME_LEN: usize = 3;

/// Malformed input rejected before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username was empty or only whitespace.
    #[error("Username must not be empty")]
    EmptyUsername,

    /// Username was shorter than [`MIN_USERNAME_LEN`] once trimmed.
    #[error("Username must be at least {} characters", MIN_USERNAME_LEN)]
    UsernameTooShort,

    /// Email was empty or only whitespace.
    #[error("Email must not be empty")]
    EmptyEmail,

    /// Email did not contain an `@`.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Product name was empty or only whitespace.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// Price was zero or negative.
    #[error("Price must be greater than 0")]
    NonPositivePrice,

    /// Price was NaN, infinite or outside the representable range.
    #[error("Invalid price value")]
    InvalidPrice,

    /// Price was in a currency other than the marketplace's.
    #[error("Price is in {actual}, expected {expected}")]
    CurrencyMismatch {
        /// The marketplace currency
        expected: String,

        /// The currency the price was given in
        actual: String,
    },

    /// A quantity or amount of zero where a positive one is required.
    #[error("Quantity must be greater than 0")]
    ZeroQuantity,

    /// Restocking would overflow the stock counter.
    #[error("Quantity overflow")]
    QuantityOverflow,

    /// Product key does not resolve to a listed product.
    #[error("Product not found")]
    UnknownProduct(ProductKey),

    /// Seller key does not resolve to a registered seller.
    #[error("Seller not found")]
    UnknownSeller(SellerKey),

    /// Buyer key does not resolve to a registered buyer.
    #[error("Buyer not found")]
    UnknownBuyer(BuyerKey),
}

/// Rejects blank product names.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyProductName`] if `name` is blank.
pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyProductName);
    }

    Ok(())
}

/// Rejects zero quantities.
///
/// # Errors
///
/// Returns [`ValidationError::ZeroQuantity`] if `quantity` is zero.
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::ZeroQuantity);
    }

    Ok(())
}
