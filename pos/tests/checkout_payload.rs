//! Checkout payload wire shape.

use erp_pos::{format_money, CartLedger, Customer, PaymentMethod, Product};
use rust_decimal_macros::dec;
use serde_json::json;

fn catalogue() -> Vec<Product> {
    serde_json::from_value(json!([
        {"id": "p-tea", "name": "Masala Tea", "price": 4.50, "category": "beverages"},
        {"id": "p-bun", "name": "Butter Bun", "price": "3.25"}
    ]))
    .unwrap()
}

fn assert_money(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().expect("money travels as a JSON number");
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

#[test]
fn test_payload_matches_checkout_contract() {
    let products = catalogue();
    let mut cart = CartLedger::new();
    cart.add_item(&products[0]);
    cart.add_item(&products[0]);
    cart.add_item(&products[1]);
    cart.set_discount(dec!(10));
    cart.set_payment_method(PaymentMethod::Mobile);
    cart.select_customer(Some(Customer {
        id: "cust-7".to_string(),
        name: "Priya".to_string(),
        phone: Some("+919876543210".to_string()),
        email: None,
    }));

    let payload = cart.checkout_payload(dec!(8)).unwrap();
    let wire = serde_json::to_value(&payload).unwrap();

    assert_money(&wire["subtotal"], 12.25);
    assert_money(&wire["discount"], 1.23);
    assert_money(&wire["tax"], 0.88);
    assert_money(&wire["total"], 11.91);
    assert_eq!(wire["paymentMethod"], json!("mobile"));
    assert_eq!(wire["customer"]["name"], json!("Priya"));
    assert_eq!(wire["cart"][0]["productId"], json!("p-tea"));
    assert_eq!(wire["cart"][0]["quantity"], json!(2));
    assert_money(&wire["cart"][0]["lineTotal"], 9.0);
    assert!(wire["saleReference"].is_string());

    // The ledger itself keeps exact values.
    let exact = cart.totals(dec!(8)).unwrap();
    assert_eq!(exact.total, dec!(11.907));
    assert_eq!(format_money(exact.total), "11.91");
}

#[test]
fn test_each_payload_gets_a_fresh_reference() {
    let products = catalogue();
    let mut cart = CartLedger::new();
    cart.add_item(&products[1]);

    let first = cart.checkout_payload(dec!(0)).unwrap();
    let second = cart.checkout_payload(dec!(0)).unwrap();
    assert_ne!(first.sale_reference, second.sale_reference);
    assert!(first.customer.is_none());
    assert_eq!(first.payment_method, PaymentMethod::Cash);
}
