//! Core types for Saree Cart.
//!
//! This module provides the domain types the cart store persists and the
//! checkout form validates.

pub mod checkout;
pub mod line_item;
pub mod price;

pub use checkout::{CheckoutError, CheckoutForm, OrderSummary, RequiredField};
pub use line_item::{CartLineItem, DecodedCart};
pub use price::{CURRENCY_SYMBOL, Price, parse_price_text};
