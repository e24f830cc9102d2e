//! Simulated checkout.
//!
//! Validates the checkout form, clears the cart, and reports where the
//! shopper should be sent next. No order is recorded anywhere.

use saree_cart_core::{CheckoutError, CheckoutForm};
use tracing::instrument;

use super::storage::SlotStorage;
use super::store::CartStore;
use super::view::CartRenderer;

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Confirmation message summarizing the order.
    pub confirmation: String,
    /// Where to navigate after checkout.
    pub redirect_to: String,
}

/// Submit the checkout form against the shopper's cart.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingFields`] if any required field is empty.
/// The cart is left untouched in that case.
#[instrument(skip_all)]
pub async fn submit<S: SlotStorage, R: CartRenderer>(
    form: &CheckoutForm,
    store: &mut CartStore<S, R>,
    landing: &str,
) -> Result<CheckoutOutcome, CheckoutError> {
    let order = form
        .validate()
        .inspect_err(|CheckoutError::MissingFields(fields)| {
            tracing::debug!(?fields, "Checkout blocked by missing fields");
        })?;

    let confirmation = order.confirmation_message();
    tracing::info!(items = store.len(), total = %store.total(), "Simulated order placed");
    store.clear().await;

    Ok(CheckoutOutcome {
        confirmation,
        redirect_to: landing.to_owned(),
    })
}
