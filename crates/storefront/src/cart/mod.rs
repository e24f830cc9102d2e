//! Shopper cart: store, view, and checkout.
//!
//! # Flow
//!
//! ```text
//! add/remove ──▶ CartStore ──▶ persist to slot "cartItems"
//!                    │
//!                    └──▶ CartRenderer::render (no-op without a view region)
//!
//! checkout ──▶ validate form ──▶ CartStore::clear ──▶ slot removed ──▶ landing page
//! ```
//!
//! The store is generic over [`SlotStorage`] so unit tests run against
//! [`MemorySlots`] while handlers use [`SessionSlots`].

pub mod checkout;
pub mod session_slots;
pub mod storage;
pub mod store;
pub mod view;

pub use checkout::{CheckoutOutcome, submit};
pub use session_slots::SessionSlots;
pub use storage::{MemorySlots, SlotStorage, StorageError};
pub use store::{AddedNotice, CART_ITEMS_KEY, CartStore};
pub use view::{CartLineView, CartRegion, CartRenderer, CartView, EMPTY_CART_MESSAGE};
