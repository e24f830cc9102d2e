//! Checkout route handlers.
//!
//! Checkout is simulated. A complete form clears the cart and sends the
//! shopper to the landing page with a confirmation notice; an incomplete
//! one re-renders the form with the validation message and leaves the cart
//! alone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use saree_cart_core::{CheckoutError, CheckoutForm, RequiredField};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart;
use crate::error::Result;
use crate::models::{set_flash, take_flash};
use crate::routes::cart::session_cart;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub form: CheckoutForm,
    pub error: Option<String>,
    pub missing: Vec<RequiredField>,
    pub total: String,
    pub item_count: usize,
    pub notice: Option<String>,
}

/// Display the checkout form.
#[instrument(skip_all)]
pub async fn show(session: Session) -> impl IntoResponse {
    let store = session_cart(&session).await;

    CheckoutTemplate {
        form: CheckoutForm::default(),
        error: None,
        missing: Vec::new(),
        total: store.total().display(),
        item_count: store.len(),
        notice: take_flash(&session).await,
    }
}

/// Submit the checkout form.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<CheckoutForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form?;
    let mut store = session_cart(&session).await;

    match cart::submit(&form, &mut store, &state.config().landing_path).await {
        Ok(outcome) => {
            set_flash(&session, &outcome.confirmation).await;
            Ok(Redirect::to(&outcome.redirect_to).into_response())
        }
        Err(err) => {
            let error = err.to_string();
            let CheckoutError::MissingFields(missing) = err;
            tracing::info!(?missing, "Checkout rejected");

            let page = CheckoutTemplate {
                error: Some(error),
                missing,
                total: store.total().display(),
                item_count: store.len(),
                notice: None,
                form,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_page_lists_missing_fields() {
        let form = CheckoutForm {
            full_name: "Asha Rao".to_string(),
            ..CheckoutForm::default()
        };
        let missing = form.missing_fields();
        let html = CheckoutTemplate {
            form,
            error: Some("Please fill in all required fields.".to_string()),
            missing,
            total: "$115.00".to_string(),
            item_count: 2,
            notice: None,
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains("Please fill in all required fields."));
        assert!(html.contains("<li>Postal code</li>"));
        assert!(html.contains(r#"value="Asha Rao""#));
        assert!(html.contains("$115.00"));
    }
}
