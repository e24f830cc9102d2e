//! Product catalog.
//!
//! The storefront is static: products are defined here rather than loaded
//! from a backend. Each product becomes an add-to-cart control carrying its
//! name, price text, and image reference.

use saree_cart_core::Price;

/// A product offered on the products page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Display name, also used as the cart line's name.
    pub name: String,
    /// Price as text, exactly as the add-to-cart control submits it.
    pub price_text: String,
    /// Image reference stored on the cart line.
    pub image: String,
    /// Short description for the product card.
    pub description: String,
}

impl Product {
    fn new(name: &str, price_text: &str, image: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            price_text: price_text.to_string(),
            image: image.to_string(),
            description: description.to_string(),
        }
    }

    /// Formatted price for display on the product card.
    #[must_use]
    pub fn display_price(&self) -> String {
        Price::parse(&self.price_text).display()
    }
}

/// The storefront's product list.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product::new(
            "Silk Saree",
            "75.00",
            "/static/images/silk.jpg",
            "Handwoven mulberry silk with a zari border.",
        ),
        Product::new(
            "Cotton Saree",
            "40.00",
            "/static/images/cotton.jpg",
            "Breathable handloom cotton for everyday wear.",
        ),
        Product::new(
            "Designer Saree",
            "120.00",
            "/static/images/designer.jpg",
            "Embroidered georgette with a sequinned pallu.",
        ),
        Product::new(
            "Banarasi Saree",
            "150.00",
            "/static/images/banarasi.jpg",
            "Brocade weave from Varanasi in deep maroon.",
        ),
        Product::new(
            "Chiffon Saree",
            "55.50",
            "/static/images/chiffon.jpg",
            "Lightweight printed chiffon that drapes easily.",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices_display() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|p| !p.display_price().contains("NaN")));
        assert_eq!(catalog[0].display_price(), "$75.00");
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let catalog = default_catalog();
        let mut names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }
}
