//! Cart line items and the persisted cart encoding.
//!
//! The persisted form is a JSON array of objects with a string `name`, a
//! numeric `price`, and a string `image`. The format has no version field, so
//! decoding is lenient per record: records without a string `name` or
//! `image` are dropped, and a price that is not a number (including the
//! `null` that `NaN` serializes to) comes back as `NaN`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::price::Price;

/// One product entry in the cart.
///
/// Duplicates by `name` are allowed; the cart never merges quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product name. Removal matches on this field.
    pub name: String,
    /// Unit price as parsed from the add-to-cart control.
    pub price: Price,
    /// Opaque reference to the product image.
    pub image: String,
}

impl CartLineItem {
    /// Create a line item from an already-parsed price.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Create a line item from the three values an add-to-cart control carries.
    ///
    /// The price text is parsed leniently; see [`Price::parse`].
    #[must_use]
    pub fn from_control(name: &str, price_text: &str, image: &str) -> Self {
        Self::new(name, Price::parse(price_text), image)
    }

    /// Decode one stored record, returning `None` when a required field is missing.
    fn from_record(record: &Value) -> Option<Self> {
        let name = record.get("name")?.as_str()?;
        let image = record.get("image")?.as_str()?;
        let price = record
            .get("price")
            .and_then(Value::as_f64)
            .unwrap_or(f64::NAN);

        Some(Self::new(name, Price::new(price), image))
    }

    /// Encode a cart as the JSON text stored in the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails, which does not
    /// happen for well-formed items.
    pub fn encode_all(items: &[Self]) -> Result<String, serde_json::Error> {
        serde_json::to_string(items)
    }

    /// Decode the JSON text stored in the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or is not an array.
    pub fn decode_all(text: &str) -> Result<DecodedCart, serde_json::Error> {
        let records: Vec<Value> = serde_json::from_str(text)?;
        let total = records.len();
        let items: Vec<Self> = records.iter().filter_map(Self::from_record).collect();

        Ok(DecodedCart {
            skipped: total - items.len(),
            items,
        })
    }
}

/// Result of decoding a persisted cart.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCart {
    /// Records that decoded into line items, in stored order.
    pub items: Vec<CartLineItem>,
    /// Number of records dropped for missing required fields.
    pub skipped: usize,
}
