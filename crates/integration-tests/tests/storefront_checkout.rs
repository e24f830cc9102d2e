//! Simulated checkout over HTTP.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use saree_cart_integration_tests::{Shopper, complete_checkout, test_app, test_app_with};
use saree_cart_storefront::config::StorefrontConfig;

async fn shopper_with_two_sarees() -> Shopper {
    let mut shopper = Shopper::new(test_app());
    shopper.add_to_cart("Silk Saree", "75.00", "silk.jpg").await;
    shopper.add_to_cart("Cotton Saree", "40.00", "cotton.jpg").await;
    shopper
}

#[tokio::test]
async fn test_checkout_page_shows_total() {
    let mut shopper = shopper_with_two_sarees().await;
    let response = shopper.get("/checkout").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("$115.00"));
    assert!(response.body.contains(r#"name="full-name""#));
}

#[tokio::test]
async fn test_missing_email_blocks_checkout() {
    let mut shopper = shopper_with_two_sarees().await;

    let fields: Vec<_> = complete_checkout()
        .into_iter()
        .filter(|(name, _)| *name != "email")
        .collect();
    let response = shopper.post_form("/checkout", &fields).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please fill in all required fields."));
    assert!(response.body.contains("<li>Email</li>"));
    assert!(response.body.contains(r#"value="Asha Rao""#));

    let cart = shopper.get("/cart").await;
    assert!(cart.body.contains(r#"<span id="cart-total">$115.00</span>"#));
}

#[tokio::test]
async fn test_blank_fields_count_as_missing() {
    let mut shopper = shopper_with_two_sarees().await;
    let response = shopper
        .post_form("/checkout", &[("full-name", ""), ("email", "")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("<li>Full name</li>"));
    assert!(response.body.contains("<li>Country</li>"));
}

#[tokio::test]
async fn test_complete_checkout_clears_cart_and_confirms() {
    let mut shopper = shopper_with_two_sarees().await;

    let response = shopper.post_form("/checkout", &complete_checkout()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let home = shopper.get("/").await;
    assert!(home.body.contains("Thank you for your order, Asha Rao!"));
    assert!(home.body.contains("12 MG Road, Bengaluru, 560001, India"));
    assert!(home.body.contains("asha@example.com"));

    let cart = shopper.get("/cart").await;
    assert!(cart.body.contains("Your cart is currently empty."));
    assert!(cart.body.contains(r#"<span id="cart-total">$0.00</span>"#));
}

#[tokio::test]
async fn test_checkout_redirects_to_configured_landing_path() {
    let config = StorefrontConfig {
        landing_path: "/products".to_string(),
        ..StorefrontConfig::default()
    };
    let mut shopper = Shopper::new(test_app_with(config));
    shopper.add_to_cart("Silk Saree", "75.00", "silk.jpg").await;

    let response = shopper.post_form("/checkout", &complete_checkout()).await;
    assert_eq!(response.location(), Some("/products"));
}
