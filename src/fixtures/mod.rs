//! Fixtures
//!
//! YAML seed files describing sellers, their catalogs and buyers' carts. A set named `market`
//! lives at `<base>/marketplace/market.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::CartError,
    fixtures::users::{BuyerFixture, SellerFixture},
    marketplace::Marketplace,
    prices::currency_from_code,
    sellers::SellerKey,
    validation::ValidationError,
};

pub mod products;
pub mod users;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product is priced in a different currency from the marketplace
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Seller not found
    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A user or product in the fixture is invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A cart line in the fixture could not be added
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// The contents of a marketplace fixture file.
#[derive(Debug, Deserialize)]
pub struct MarketplaceFixture {
    /// ISO code of the marketplace currency
    pub currency: String,

    /// Sellers in registration order
    #[serde(default)]
    pub sellers: Vec<SellerFixture>,

    /// Buyers in registration order
    #[serde(default)]
    pub buyers: Vec<BuyerFixture>,
}

impl TryFrom<MarketplaceFixture> for Marketplace<'static> {
    type Error = FixtureError;

    fn try_from(fixture: MarketplaceFixture) -> Result<Self, Self::Error> {
        let currency = currency_from_code(&fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(fixture.currency.clone()))?;

        let mut market = Marketplace::new(currency);
        let mut seller_keys: FxHashMap<String, SellerKey> = FxHashMap::default();

        for seller_fixture in fixture.sellers {
            let seller = market.register_seller(&seller_fixture.username, &seller_fixture.email)?;

            for product_fixture in seller_fixture.products {
                let (minor_units, product_currency) = products::parse_price(&product_fixture.price)?;

                if product_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }

                market.upload_product_priced(
                    seller,
                    &product_fixture.name,
                    Money::from_minor(minor_units, currency),
                    product_fixture.quantity,
                )?;
            }

            seller_keys.insert(seller_fixture.username.trim().to_string(), seller);
        }

        for buyer_fixture in fixture.buyers {
            let buyer = market.register_buyer(&buyer_fixture.username, &buyer_fixture.email)?;

            for line in buyer_fixture.cart {
                let seller = seller_keys
                    .get(&line.seller)
                    .copied()
                    .ok_or_else(|| FixtureError::SellerNotFound(line.seller.clone()))?;

                let product = market
                    .find_product(seller, &line.product)?
                    .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

                market.add_to_cart(buyer, product, line.quantity)?;
            }
        }

        Ok(market)
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a marketplace from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any user, product or cart
    /// line in it is rejected.
    pub fn load(&self, name: &str) -> Result<Marketplace<'static>, FixtureError> {
        let file_path = self
            .base_path
            .join("marketplace")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;

        Self::parse(&contents)
    }

    /// Build a marketplace from YAML fixture contents
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, or if any user, product or cart line in
    /// it is rejected.
    pub fn parse(contents: &str) -> Result<Marketplace<'static>, FixtureError> {
        let fixture: MarketplaceFixture = serde_norway::from_str(contents)?;

        fixture.try_into()
    }

    /// Load a named fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture set cannot be loaded.
    pub fn from_set(name: &str) -> Result<Marketplace<'static>, FixtureError> {
        Self::new().load(name)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PHP;
    use testresult::TestResult;

    use crate::{products::InsufficientStockError, users::User};

    use super::*;

    const MARKET: &str = r#"
currency: PHP
sellers:
  - username: alice
    email: alice@example.com
    products:
      - name: Widget
        price: "10.00 PHP"
        quantity: 5
      - name: Gadget
        price: "2.50 PHP"
        quantity: 10
buyers:
  - username: bob
    email: bob@example.com
    cart:
      - seller: alice
        product: widget
        quantity: 3
  - username: carol
    email: carol@example.com
"#;

    #[test]
    fn parse_builds_users_catalog_and_carts() -> TestResult {
        let market = Fixture::parse(MARKET)?;

        assert_eq!(market.currency(), PHP);
        assert_eq!(market.sellers().count(), 1);
        assert_eq!(market.buyers().count(), 2);
        assert_eq!(market.browse_products().len(), 2);

        let Some(User::Buyer(bob)) = market.user("bob") else {
            return Err("expected bob to be a buyer".into());
        };

        let cart = market.buyer(bob).ok_or("missing bob")?.cart();

        assert_eq!(cart.len(), 1);
        assert_eq!(
            market.buyer(bob).ok_or("missing bob")?.cart_total(market.products())?,
            Money::from_minor(3000, PHP)
        );

        Ok(())
    }

    #[test]
    fn load_reads_from_base_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("marketplace"))?;
        fs::write(dir.path().join("marketplace").join("small.yml"), MARKET)?;

        let market = Fixture::with_base_path(dir.path()).load("small")?;

        assert_eq!(market.users().count(), 3);

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = Fixture::with_base_path(dir.path()).load("absent");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let yaml = r#"
currency: PHP
sellers:
  - username: alice
    email: alice@example.com
    products:
      - name: Widget
        price: "10.00 USD"
        quantity: 5
"#;

        assert!(matches!(
            Fixture::parse(yaml),
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "PHP" && found == "USD"
        ));
    }

    #[test]
    fn cart_lines_go_through_stock_checks() {
        let yaml = r#"
currency: PHP
sellers:
  - username: alice
    email: alice@example.com
    products:
      - name: Widget
        price: "10.00 PHP"
        quantity: 2
buyers:
  - username: bob
    email: bob@example.com
    cart:
      - seller: alice
        product: Widget
        quantity: 3
"#;

        assert!(matches!(
            Fixture::parse(yaml),
            Err(FixtureError::Cart(CartError::InsufficientStock(InsufficientStockError {
                requested: 3,
                available: 2,
                ..
            })))
        ));
    }

    #[test]
    fn unknown_references_are_rejected() {
        let unknown_seller = r#"
currency: PHP
buyers:
  - username: bob
    email: bob@example.com
    cart:
      - seller: zed
        product: Widget
        quantity: 1
"#;

        let unknown_currency = "currency: XYZ\n";

        let invalid_user = r#"
currency: PHP
sellers:
  - username: al
    email: al@example.com
"#;

        assert!(matches!(
            Fixture::parse(unknown_seller),
            Err(FixtureError::SellerNotFound(name)) if name == "zed"
        ));
        assert!(matches!(
            Fixture::parse(unknown_currency),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));
        assert!(matches!(
            Fixture::parse(invalid_user),
            Err(FixtureError::Validation(ValidationError::UsernameTooShort))
        ));
    }
}
