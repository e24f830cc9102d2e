//! Integration tests for Saree Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p saree-cart-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt`
//! against an in-memory session store. [`Shopper`] plays the browser: it
//! keeps the session cookie between requests so the cart slot persists the
//! way it would across page loads.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use saree_cart_storefront::catalog::default_catalog;
use saree_cart_storefront::config::StorefrontConfig;
use saree_cart_storefront::middleware::SESSION_COOKIE_NAME;
use saree_cart_storefront::state::AppState;
use tower::ServiceExt;
use tower_sessions::session::{Id, Record};
use tower_sessions::{MemoryStore, SessionStore, session_store};

/// Build a storefront router backed by a fresh in-memory session store.
#[must_use]
pub fn test_app() -> Router {
    test_app_with(StorefrontConfig::default())
}

/// Build a storefront router with a specific configuration.
#[must_use]
pub fn test_app_with(config: StorefrontConfig) -> Router {
    let state = AppState::new(config, default_catalog());
    saree_cart_storefront::app(state, MemoryStore::default())
}

/// Build a storefront router over a specific session backend.
#[must_use]
pub fn test_app_with_store<S: SessionStore + Clone>(store: S) -> Router {
    let state = AppState::new(StorefrontConfig::default(), default_catalog());
    saree_cart_storefront::app(state, store)
}

/// A session backend whose database is unreachable.
#[derive(Debug, Clone, Copy)]
pub struct UnreachableStore;

impl UnreachableStore {
    fn error() -> session_store::Error {
        session_store::Error::Backend("connection refused".to_string())
    }
}

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn create(&self, _record: &mut Record) -> session_store::Result<()> {
        Err(Self::error())
    }

    async fn save(&self, _record: &Record) -> session_store::Result<()> {
        Err(Self::error())
    }

    async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
        Err(Self::error())
    }

    async fn delete(&self, _id: &Id) -> session_store::Result<()> {
        Err(Self::error())
    }
}

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// A browser-like client holding one shopper's session cookie.
pub struct Shopper {
    app: Router,
    cookie: Option<String>,
}

impl Shopper {
    /// Start a new shopper with no session.
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Issue a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Issue a form POST.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.post_form_with(path, fields, &[]).await
    }

    /// Issue a form POST with extra headers.
    pub async fn post_form_with(
        &mut self,
        path: &str,
        fields: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder.body(Body::from(encode_form(fields))).unwrap();
        self.send(request).await
    }

    /// Add a catalog-style item via the add-to-cart control.
    pub async fn add_to_cart(&mut self, name: &str, price: &str, image: &str) -> TestResponse {
        self.post_form("/cart/add", &[("name", name), ("price", price), ("image", image)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default();
            if pair.starts_with(SESSION_COOKIE_NAME) {
                self.cookie = Some(pair.to_string());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Encode fields as `application/x-www-form-urlencoded`.
fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The six required checkout fields, all filled in.
#[must_use]
pub fn complete_checkout() -> Vec<(&'static str, &'static str)> {
    vec![
        ("full-name", "Asha Rao"),
        ("email", "asha@example.com"),
        ("shipping-address", "12 MG Road"),
        ("city", "Bengaluru"),
        ("postal-code", "560001"),
        ("country", "India"),
        ("card-number", "4111111111111111"),
    ]
}
