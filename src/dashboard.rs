//! Dashboards

use std::fmt::{self, Write};

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    buyers::{Buyer, BuyerKey},
    marketplace::Marketplace,
    pricing::{TotalPriceError, item_total},
    products::{Product, ProductKey},
    sellers::{Seller, SellerKey},
    users::Identity,
};

/// Errors that can occur when rendering a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A catalog or cart references a product that is not listed.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// A user or product references a seller that is not registered.
    #[error("Missing seller")]
    MissingSeller(SellerKey),

    /// The buyer is not registered.
    #[error("Missing buyer")]
    MissingBuyer(BuyerKey),

    /// Error calculating a cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error writing the output.
    #[error(transparent)]
    Format(#[from] fmt::Error),
}

/// A human-readable summary of a user's account.
pub trait Dashboard {
    /// Renders the summary against the current state of `market`.
    ///
    /// # Errors
    ///
    /// Returns a [`DashboardError`] if the account references state missing from `market`.
    fn dashboard(&self, market: &Marketplace<'_>) -> Result<String, DashboardError>;
}

impl Dashboard for Seller {
    fn dashboard(&self, market: &Marketplace<'_>) -> Result<String, DashboardError> {
        let mut out = String::new();

        write_header(&mut out, "SELLER DASHBOARD", self.identity())?;
        writeln!(out, "Total Products Listed: {}", self.products().len())?;
        writeln!(out)?;

        if self.products().is_empty() {
            writeln!(out, "No products listed yet.")?;

            return Ok(out);
        }

        let mut builder = Builder::default();
        builder.push_record(["Product", "Price", "Qty"]);

        for key in self.products() {
            let product = lookup(market, *key)?;

            builder.push_record([
                product.name().to_string(),
                format!("{}", product.price()),
                product.quantity().to_string(),
            ]);
        }

        writeln!(out, "Products:")?;
        write_table(&mut out, builder)?;

        Ok(out)
    }
}

impl Dashboard for Buyer {
    fn dashboard(&self, market: &Marketplace<'_>) -> Result<String, DashboardError> {
        let mut out = String::new();
        let cart = self.cart();

        write_header(&mut out, "BUYER DASHBOARD", self.identity())?;
        writeln!(out, "Items in Cart: {}", cart.len())?;
        writeln!(out, "Cart Total: {}", self.cart_total(market.products())?)?;
        writeln!(out)?;

        if cart.is_empty() {
            writeln!(out, "Cart is empty.")?;
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Item", "Qty", "Total"]);

            for item in cart.iter() {
                let product = lookup(market, item.product())?;

                builder.push_record([
                    product.name().to_string(),
                    item.quantity().to_string(),
                    format!("{}", item_total(item, market.products())?),
                ]);
            }

            writeln!(out, "Cart Items:")?;
            write_table(&mut out, builder)?;
        }

        writeln!(out)?;
        out.push_str(&available_products(market)?);

        Ok(out)
    }
}

/// Lists everything that can be bought right now, with the seller's username.
///
/// # Errors
///
/// Returns a [`DashboardError`] if a listed product's seller is not registered.
pub fn available_products(market: &Marketplace<'_>) -> Result<String, DashboardError> {
    let mut out = String::new();
    let available = market.browse_products();

    writeln!(out, "AVAILABLE PRODUCTS")?;

    if available.is_empty() {
        writeln!(out, "No products available.")?;

        return Ok(out);
    }

    let mut builder = Builder::default();
    builder.push_record(["Product", "Seller", "Price", "Qty"]);

    for key in available {
        let product = lookup(market, key)?;
        let seller = market
            .seller(product.seller())
            .ok_or(DashboardError::MissingSeller(product.seller()))?;

        builder.push_record([
            product.name().to_string(),
            seller.identity().username().to_string(),
            format!("{}", product.price()),
            product.quantity().to_string(),
        ]);
    }

    write_table(&mut out, builder)?;

    Ok(out)
}

fn lookup<'m, 'a>(
    market: &'m Marketplace<'a>,
    key: ProductKey,
) -> Result<&'m Product<'a>, DashboardError> {
    market
        .product(key)
        .ok_or(DashboardError::MissingProduct(key))
}

fn write_header(out: &mut String, title: &str, identity: &Identity) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "Username: {}", identity.username())?;
    writeln!(out, "Email: {}", identity.email())
}

fn write_table(out: &mut String, builder: Builder) -> fmt::Result {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());

    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        marketplace::Marketplace,
        users::{User, UserKind},
    };

    use super::*;

    fn market<'a>() -> TestResult<(Marketplace<'a>, User, User)> {
        let mut market = Marketplace::with_default_currency();
        let alice = market.create_user(UserKind::Seller, "alice", "alice@example.com")?;
        let bob = market.create_user(UserKind::Buyer, "bob", "bob@example.com")?;

        Ok((market, alice, bob))
    }

    #[test]
    fn seller_dashboard_lists_products() -> TestResult {
        let (mut market, alice, _) = market()?;
        let User::Seller(seller) = alice else {
            return Err("expected a seller".into());
        };

        let empty = market.dashboard(alice)?;
        assert!(empty.starts_with("SELLER DASHBOARD\nUsername: alice\nEmail: alice@example.com\n"));
        assert!(empty.contains("Total Products Listed: 0"));
        assert!(empty.contains("No products listed yet."));

        market.upload_product(seller, "Widget", 10.0, 5)?;
        let listed = market.dashboard(alice)?;

        assert!(listed.contains("Total Products Listed: 1"));
        assert!(listed.contains("Widget"));
        assert!(listed.contains("10.00"));

        Ok(())
    }

    #[test]
    fn buyer_dashboard_shows_cart_and_listing() -> TestResult {
        let (mut market, alice, bob) = market()?;
        let (User::Seller(seller), User::Buyer(buyer)) = (alice, bob) else {
            return Err("unexpected user kinds".into());
        };

        let empty = market.dashboard(bob)?;
        assert!(empty.contains("Items in Cart: 0"));
        assert!(empty.contains("Cart is empty."));
        assert!(empty.contains("No products available."));

        let widget = market.upload_product(seller, "Widget", 10.0, 5)?;
        market.add_to_cart(buyer, widget, 3)?;

        let populated = market.dashboard(bob)?;
        assert!(populated.contains("Items in Cart: 1"));
        assert!(populated.contains("30.00"));
        assert!(populated.contains("AVAILABLE PRODUCTS"));
        assert!(populated.contains("alice"));

        Ok(())
    }
}
