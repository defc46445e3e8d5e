//! Tindahan
//!
//! Tindahan is the in-memory core of a small marketplace: sellers list products, buyers fill
//! carts, and checkout commits every cart line against live stock or none of them.

pub mod buyers;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod fixtures;
pub mod marketplace;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod sellers;
pub mod users;
pub mod utils;
pub mod validation;
