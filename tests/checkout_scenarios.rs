//! End-to-end checkout scenarios through the marketplace API.

use rusty_money::{Money, iso::PHP};
use testresult::TestResult;

use tindahan::prelude::*;

struct Shop<'a> {
    market: Marketplace<'a>,
    alice: SellerKey,
    bob: BuyerKey,
    carol: BuyerKey,
}

fn shop<'a>() -> Result<Shop<'a>, ValidationError> {
    let mut market = Marketplace::with_default_currency();

    let alice = market.register_seller("alice", "alice@example.com")?;
    let bob = market.register_buyer("bob", "bob@example.com")?;
    let carol = market.register_buyer("carol", "carol@example.com")?;

    Ok(Shop {
        market,
        alice,
        bob,
        carol,
    })
}

fn stock(market: &Marketplace<'_>, product: ProductKey) -> Option<u32> {
    market.product(product).map(Product::quantity)
}

fn cart_quantity(market: &Marketplace<'_>, buyer: BuyerKey, product: ProductKey) -> Option<u32> {
    market
        .buyer(buyer)
        .and_then(|buyer| buyer.cart().get_item(product))
        .map(CartItem::quantity)
}

#[test]
fn widget_purchase() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        ..
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;

    market.add_to_cart(bob, widget, 3)?;

    let err = market.add_to_cart(bob, widget, 3).err();

    assert!(matches!(
        err,
        Some(CartError::InsufficientStock(InsufficientStockError {
            requested: 6,
            available: 5,
            ..
        }))
    ));
    assert_eq!(cart_quantity(&market, bob, widget), Some(3));

    let order = market.checkout(bob)?.ok_or("expected an order")?;

    assert_eq!(order.total(), Money::from_minor(30_00, PHP));
    assert_eq!(stock(&market, widget), Some(2));
    assert!(market.buyer(bob).ok_or("missing bob")?.cart().is_empty());

    Ok(())
}

#[test]
fn second_checkout_of_oversold_product_fails_atomically() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        carol,
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;

    market.add_to_cart(bob, widget, 4)?;
    market.add_to_cart(carol, widget, 4)?;

    assert_eq!(stock(&market, widget), Some(5));

    market.checkout(bob)?;

    assert_eq!(stock(&market, widget), Some(1));

    let err = market.checkout(carol).err().ok_or("expected a checkout error")?;

    assert_eq!(
        err.shortages(),
        &[Shortage {
            product: widget,
            name: "Widget".to_string(),
            requested: 4,
            available: 1,
        }]
    );
    assert_eq!(cart_quantity(&market, carol, widget), Some(4));
    assert_eq!(stock(&market, widget), Some(1));

    Ok(())
}

#[test]
fn every_failing_line_is_reported() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        carol,
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;
    let gadget = market.upload_product(alice, "Gadget", 249.50, 2)?;
    let notebook = market.upload_product(alice, "Notebook", 45.00, 10)?;

    market.add_to_cart(carol, widget, 5)?;
    market.add_to_cart(carol, notebook, 1)?;
    market.add_to_cart(carol, gadget, 2)?;

    market.add_to_cart(bob, widget, 1)?;
    market.add_to_cart(bob, gadget, 1)?;
    market.checkout(bob)?;

    let err = market.checkout(carol).err().ok_or("expected a checkout error")?;
    let failing: Vec<(&str, u32, u32)> = err
        .shortages()
        .iter()
        .map(|shortage| (shortage.name.as_str(), shortage.requested, shortage.available))
        .collect();

    assert_eq!(failing, vec![("Widget", 5, 4), ("Gadget", 2, 1)]);
    assert_eq!(stock(&market, notebook), Some(10));
    assert_eq!(market.buyer(carol).ok_or("missing carol")?.cart().len(), 3);

    Ok(())
}

#[test]
fn empty_checkout_changes_nothing() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        ..
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;

    assert_eq!(market.checkout(bob)?, None);
    assert_eq!(stock(&market, widget), Some(5));

    Ok(())
}

#[test]
fn restocking_lets_a_failed_checkout_through() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        carol,
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;

    market.add_to_cart(bob, widget, 4)?;
    market.add_to_cart(carol, widget, 4)?;
    market.checkout(bob)?;

    assert!(market.checkout(carol).is_err());

    market.restock(widget, 3)?;

    let order = market.checkout(carol)?.ok_or("expected an order")?;

    assert_eq!(order.units(), 4);
    assert_eq!(stock(&market, widget), Some(0));
    assert!(market.browse_products().is_empty());

    Ok(())
}

#[test]
fn cart_total_tracks_price_changes_until_checkout() -> TestResult {
    let Shop {
        mut market,
        alice,
        bob,
        ..
    } = shop()?;

    let widget = market.upload_product(alice, "Widget", 10.00, 5)?;

    market.add_to_cart(bob, widget, 2)?;
    market.set_product_price(widget, 12.00)?;

    let total = market
        .buyer(bob)
        .ok_or("missing bob")?
        .cart_total(market.products())?;

    assert_eq!(total, Money::from_minor(24_00, PHP));

    let order = market.checkout(bob)?.ok_or("expected an order")?;

    assert_eq!(order.total(), total);

    Ok(())
}
