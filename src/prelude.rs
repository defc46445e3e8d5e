//! Tindahan prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    buyers::{Buyer, BuyerKey, browse_products},
    cart::{Cart, CartError, CartItem},
    checkout::{CheckoutError, Order, OrderLine, Shortage},
    dashboard::{Dashboard, DashboardError, available_products},
    fixtures::{Fixture, FixtureError},
    marketplace::Marketplace,
    prices::price_from_f64,
    pricing::TotalPriceError,
    products::{InsufficientStockError, Product, ProductKey},
    sellers::{Seller, SellerKey},
    users::{Identity, User, UserKind},
    validation::ValidationError,
};
