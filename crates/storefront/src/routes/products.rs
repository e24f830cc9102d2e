//! Product page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Product;
use crate::models::take_flash;
use crate::state::AppState;

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub products: Vec<Product>,
    pub notice: Option<String>,
}

/// Display the product listing with add-to-cart controls.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    ProductsTemplate {
        products: state.catalog().to_vec(),
        notice: take_flash(&session).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_products_render_add_controls() {
        let html = ProductsTemplate {
            products: default_catalog(),
            notice: Some("Silk Saree has been added to your cart!".to_string()),
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains(r#"action="/cart/add""#));
        assert!(html.contains(r##"hx-post="/cart/add" hx-target="#notices""##));
        assert!(html.contains("htmx.org"));
        assert!(html.contains(r#"name="price" value="75.00""#));
        assert!(html.contains("$55.50"));
        assert!(html.contains("Silk Saree has been added to your cart!"));
    }
}
