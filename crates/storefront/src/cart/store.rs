//! The cart store.
//!
//! Owns one shopper's cart for the lifetime of a request and mirrors it to
//! the persisted slot after every mutation. Storage failures are logged and
//! swallowed: the in-memory items stay authoritative and the request carries
//! on as if storage had worked.

use core::fmt;

use saree_cart_core::{CartLineItem, Price};
use tracing::instrument;

use super::storage::SlotStorage;
use super::view::CartRenderer;

/// Slot key holding the serialized cart.
pub const CART_ITEMS_KEY: &str = "cartItems";

/// Slot key used to check that storage accepts writes.
const WRITE_CHECK_KEY: &str = "__testStorage";

/// Confirmation returned when an item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedNotice {
    /// Name of the item that was added.
    pub name: String,
}

impl AddedNotice {
    /// The message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} has been added to your cart!", self.name)
    }
}

impl fmt::Display for AddedNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A shopper's cart, backed by slot storage `S` and rendered by `R`.
///
/// `R` is `()` when the current page has no view region.
#[derive(Debug)]
pub struct CartStore<S, R = ()> {
    storage: S,
    items: Vec<CartLineItem>,
    view: R,
}

impl<S: SlotStorage> CartStore<S> {
    /// Restore the cart from storage.
    ///
    /// An absent slot, unreadable storage, or malformed text all yield an
    /// empty cart. Nothing is returned as an error. Storage writability is
    /// only checked when no cart is persisted yet: an existing slot was
    /// written by an earlier request.
    pub async fn initialize(storage: S) -> Self {
        let stored = read_slot(&storage).await;
        if stored.is_none() {
            check_writable(&storage).await;
        }
        let items = stored.map_or_else(Vec::new, |text| decode(&text));

        Self {
            storage,
            items,
            view: (),
        }
    }
}

impl<S: SlotStorage, R: CartRenderer> CartStore<S, R> {
    /// Attach a view region and render it with the current items.
    #[must_use]
    pub fn with_view<V: CartRenderer>(self, mut view: V) -> CartStore<S, V> {
        view.render(&self.items);
        CartStore {
            storage: self.storage,
            items: self.items,
            view,
        }
    }

    /// The items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// The attached view region.
    #[must_use]
    pub const fn view(&self) -> &R {
        &self.view
    }

    /// Consume the store, returning its view region.
    #[must_use]
    pub fn into_view(self) -> R {
        self.view
    }

    /// Append an item built from an add-to-cart control's values.
    ///
    /// The price text is not validated: text without a numeric prefix is
    /// stored as `NaN`.
    #[instrument(skip(self), fields(items = self.items.len()))]
    pub async fn add(&mut self, name: &str, price_text: &str, image: &str) -> AddedNotice {
        let item = CartLineItem::from_control(name, price_text, image);
        if item.price.is_nan() {
            tracing::warn!(name, price_text, "Price text is not numeric, storing NaN");
        }

        self.items.push(item);
        tracing::debug!(items = self.items.len(), "Item added to cart");
        self.commit().await;

        AddedNotice {
            name: name.to_owned(),
        }
    }

    /// Remove every item named `name`.
    ///
    /// Returns how many items were removed. The cart is persisted and
    /// re-rendered even when nothing matched.
    #[instrument(skip(self), fields(items = self.items.len()))]
    pub async fn remove(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        let removed = before - self.items.len();

        tracing::debug!(removed, items = self.items.len(), "Items removed from cart");
        self.commit().await;
        removed
    }

    /// Write the full cart to the slot.
    ///
    /// Failures are logged; the in-memory cart is unaffected.
    pub async fn persist(&self) {
        let text = match CartLineItem::encode_all(&self.items) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_ITEMS_KEY, text).await {
            tracing::error!("Failed to persist cart, continuing in memory: {e}");
        }
    }

    /// Empty the cart and delete the slot.
    #[instrument(skip(self), fields(items = self.items.len()))]
    pub async fn clear(&mut self) {
        self.items.clear();

        if let Err(e) = self.storage.remove(CART_ITEMS_KEY).await {
            tracing::error!("Failed to remove persisted cart: {e}");
        }

        self.view.render(&self.items);
        tracing::debug!("Cart cleared");
    }

    async fn commit(&mut self) {
        self.persist().await;
        self.view.render(&self.items);
    }
}

/// Check that storage accepts a write and a removal, logging the outcome.
async fn check_writable<S: SlotStorage>(storage: &S) {
    let result = async {
        storage.set(WRITE_CHECK_KEY, "test".to_string()).await?;
        storage.remove(WRITE_CHECK_KEY).await
    }
    .await;

    match result {
        Ok(()) => tracing::trace!("Slot storage is available and writable"),
        Err(e) => tracing::warn!("Slot storage is not writable, cart will not persist: {e}"),
    }
}

/// Read the persisted cart text, treating unreadable storage as absent.
async fn read_slot<S: SlotStorage>(storage: &S) -> Option<String> {
    match storage.get(CART_ITEMS_KEY).await {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            tracing::debug!("No persisted cart, starting empty");
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read persisted cart, starting empty: {e}");
            None
        }
    }
}

/// Decode persisted cart text, falling back to empty.
fn decode(text: &str) -> Vec<CartLineItem> {
    match CartLineItem::decode_all(text) {
        Ok(decoded) => {
            if decoded.skipped > 0 {
                tracing::warn!(
                    skipped = decoded.skipped,
                    "Dropped persisted cart records missing required fields"
                );
            }
            tracing::debug!(items = decoded.items.len(), "Restored persisted cart");
            decoded.items
        }
        Err(e) => {
            tracing::warn!("Failed to parse persisted cart, starting empty: {e}");
            Vec::new()
        }
    }
}
