//! Saree Cart Core - Shared cart types.
//!
//! This crate provides the types shared by the Saree Cart components:
//! - `storefront` - The shopper-facing site that owns the cart store
//! - `cli` - Command-line tools for session storage management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! session access, no HTTP. Everything here can be unit tested without a
//! runtime.
//!
//! # Modules
//!
//! - [`types`] - Line items, prices, and checkout form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
