//! Integration tests for the bundled fixture sets.

use rusty_money::{Money, iso::PHP};
use testresult::TestResult;

use tindahan::prelude::*;

fn buyer(market: &Marketplace<'_>, username: &str) -> TestResult<BuyerKey> {
    match market.user(username) {
        Some(User::Buyer(key)) => Ok(key),
        _ => Err(format!("no buyer named {username}").into()),
    }
}

#[test]
fn market_fixture_checks_out_bob() -> TestResult {
    let mut market = Fixture::from_set("market")?;
    let bob = buyer(&market, "bob")?;
    let carol = buyer(&market, "carol")?;

    let order = market.checkout(bob)?.ok_or("expected an order")?;

    // 3 x 10.00 + 2 x 45.00
    assert_eq!(order.total(), Money::from_minor(120_00, PHP));
    assert_eq!(market.checkout(carol)?, None);

    Ok(())
}

#[test]
fn oversold_fixture_rejects_second_buyer() -> TestResult {
    let mut market = Fixture::from_set("oversold")?;
    let bob = buyer(&market, "bob")?;
    let carol = buyer(&market, "carol")?;

    market.checkout(bob)?;

    let err = market.checkout(carol).err().ok_or("expected a checkout error")?;

    assert_eq!(err.shortages().len(), 1);
    assert_eq!(
        err.to_string(),
        "Checkout failed:\nWidget: insufficient stock (requested 4, available 1)"
    );

    let dashboard = market.dashboard(User::Buyer(carol))?;

    assert!(dashboard.contains("Items in Cart: 2"));

    Ok(())
}
