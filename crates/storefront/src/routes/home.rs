//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use crate::models::take_flash;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub notice: Option<String>,
}

/// Display the landing page, including any pending order confirmation.
#[instrument(skip_all)]
pub async fn home(session: Session) -> impl IntoResponse {
    HomeTemplate {
        notice: take_flash(&session).await,
    }
}
