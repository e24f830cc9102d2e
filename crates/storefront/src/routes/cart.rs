//! Cart route handlers.
//!
//! Every handler builds a fresh cart store from the shopper's session, so
//! the session's `cartItems` slot is the only cart state that survives
//! between requests. Mutations from plain form posts redirect; HTMX requests
//! get fragments back instead.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::rejection::FormRejection,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartRegion, CartStore, CartView, SessionSlots};
use crate::error::Result;
use crate::models::{set_flash, take_flash};

/// Header HTMX sets on requests it issues.
const HX_REQUEST_HEADER: &str = "HX-Request";

/// Event HTMX listeners use to refresh cart-dependent fragments.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Returns `true` if the request was issued by HTMX.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Build the cart store for this request's session.
pub(crate) async fn session_cart(session: &Session) -> CartStore<SessionSlots> {
    CartStore::initialize(SessionSlots::new(session.clone())).await
}

/// Add to cart form data, as carried by an add-to-cart control.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub price: String,
    pub image: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub name: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub notice: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Notice fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub message: String,
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(session: Session) -> impl IntoResponse {
    let store = session_cart(&session).await.with_view(CartRegion::new());

    CartShowTemplate {
        cart: store.into_view().into_view(),
        notice: take_flash(&session).await,
    }
}

/// Add item to cart.
///
/// Plain posts flash the notice and return to the products page. HTMX posts
/// get the notice fragment and a `cart-updated` trigger.
#[instrument(skip_all)]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    tracing::info!(name = %form.name, price = %form.price, "Adding item to cart");

    let mut store = session_cart(&session).await;
    let notice = store.add(&form.name, &form.price, &form.image).await;

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([CART_UPDATED_TRIGGER]),
            NoticeTemplate {
                message: notice.message(),
            },
        )
            .into_response());
    }

    set_flash(&session, &notice.message()).await;
    Ok(Redirect::to("/products").into_response())
}

/// Remove every item with the given name.
///
/// The cart page's view region is attached so HTMX posts get the
/// re-rendered items fragment; plain posts return to the cart page.
#[instrument(skip_all)]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    form: std::result::Result<Form<RemoveFromCartForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;

    let mut store = session_cart(&session).await.with_view(CartRegion::new());
    let removed = store.remove(&form.name).await;
    tracing::info!(name = %form.name, removed, "Removed items from cart");

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([CART_UPDATED_TRIGGER]),
            CartItemsTemplate {
                cart: store.into_view().into_view(),
            },
        )
            .into_response());
    }

    Ok(Redirect::to("/cart").into_response())
}
