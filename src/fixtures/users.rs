//! User Fixtures

use serde::Deserialize;

use crate::fixtures::products::ProductFixture;

/// Seller Fixture
#[derive(Debug, Deserialize)]
pub struct SellerFixture {
    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Catalog in upload order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Buyer Fixture
#[derive(Debug, Deserialize)]
pub struct BuyerFixture {
    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Lines to add to the cart, in order
    #[serde(default)]
    pub cart: Vec<CartFixture>,
}

/// A cart line, naming the product by seller username and product name.
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Seller username
    pub seller: String,

    /// Product name, matched ignoring case
    pub product: String,

    /// Units to add
    pub quantity: u32,
}
