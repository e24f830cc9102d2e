//! Cart view rendering.
//!
//! The cart store notifies a [`CartRenderer`] after every mutation. Pages
//! without a view region use `()`, which ignores the notification; the cart
//! page attaches a [`CartRegion`] that rebuilds its [`CartView`] each time.

use saree_cart_core::{CartLineItem, Price};

/// Message shown in place of line items when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is currently empty.";

/// Subscriber notified with the full item list after each cart mutation.
pub trait CartRenderer {
    /// Re-render from the current items.
    fn render(&mut self, items: &[CartLineItem]);
}

/// No view region on this page.
impl CartRenderer for () {
    fn render(&mut self, _items: &[CartLineItem]) {}
}

/// Line item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub name: String,
    pub image: String,
    pub price: String,
}

impl From<&CartLineItem> for CartLineView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::ZERO.display(),
        }
    }

    /// Build the view for `items`, in order, with their summed total.
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        if items.is_empty() {
            return Self::empty();
        }

        let total: Price = items.iter().map(|item| item.price).sum();
        Self {
            lines: items.iter().map(CartLineView::from).collect(),
            total: total.display(),
        }
    }

    /// Returns `true` if there are no lines to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Message for the empty state.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        EMPTY_CART_MESSAGE
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::empty()
    }
}

/// The cart page's view region.
#[derive(Debug, Clone, Default)]
pub struct CartRegion {
    view: CartView,
    renders: usize,
}

impl CartRegion {
    /// Create a region that has not been rendered yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered view.
    #[must_use]
    pub const fn view(&self) -> &CartView {
        &self.view
    }

    /// Consume the region, returning its last rendered view.
    #[must_use]
    pub fn into_view(self) -> CartView {
        self.view
    }

    /// Number of times the region has been rendered.
    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }
}

impl CartRenderer for CartRegion {
    fn render(&mut self, items: &[CartLineItem]) {
        self.view = CartView::from_items(items);
        self.renders += 1;
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(name: &str, price: &str) -> CartLineItem {
        CartLineItem::from_control(name, price, &format!("{name}.jpg"))
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::from_items(&[]);
        assert!(view.is_empty());
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.empty_message(), "Your cart is currently empty.");
    }

    #[test]
    fn test_lines_in_order_with_total() {
        let view = CartView::from_items(&[item("Saree A", "50.00"), item("Saree B", "100.00")]);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].name, "Saree A");
        assert_eq!(view.lines[0].price, "$50.00");
        assert_eq!(view.lines[1].image, "Saree B.jpg");
        assert_eq!(view.total, "$150.00");
    }

    #[test]
    fn test_total_is_order_independent() {
        let prices = ["19.99", "0.10", "0.20", "120.00", "7.35"];
        let forward: Vec<_> = prices.iter().map(|p| item("x", p)).collect();
        let reversed: Vec<_> = prices.iter().rev().map(|p| item("x", p)).collect();
        let rotated: Vec<_> = prices
            .iter()
            .cycle()
            .skip(2)
            .take(prices.len())
            .map(|p| item("x", p))
            .collect();

        let expected = CartView::from_items(&forward).total;
        assert_eq!(expected, "$147.64");
        assert_eq!(CartView::from_items(&reversed).total, expected);
        assert_eq!(CartView::from_items(&rotated).total, expected);
    }

    #[test]
    fn test_nan_price_shows_through() {
        let view = CartView::from_items(&[item("Good", "10"), item("Odd", "ask")]);
        assert_eq!(view.lines[1].price, "$NaN");
        assert_eq!(view.total, "$NaN");
    }

    #[test]
    fn test_region_tracks_renders() {
        let mut region = CartRegion::new();
        assert_eq!(region.renders(), 0);

        region.render(&[item("Silk Saree", "75.00")]);
        region.render(&[]);
        assert_eq!(region.renders(), 2);
        assert!(region.view().is_empty());
    }

    #[test]
    fn test_unit_renderer_is_noop() {
        CartRenderer::render(&mut (), &[item("Silk Saree", "75.00")]);
    }
}
