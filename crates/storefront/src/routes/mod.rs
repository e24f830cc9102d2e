//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page (shows flash notices)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing with add-to-cart controls
//!
//! # Cart
//! GET  /cart                   - Cart page (view region attached)
//! POST /cart/add               - Add to cart (redirect, or notice fragment for HTMX)
//! POST /cart/remove            - Remove by name (redirect, or cart_items fragment for HTMX)
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Simulated order; clears cart, redirects to landing page
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Product listing
        .route("/products", get(products::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Simulated checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .fallback(not_found)
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
