//! Session-scoped models for the storefront.

pub mod session;

pub use session::{set_flash, take_flash};
