//! Session middleware configuration.
//!
//! The session is the shopper's persisted cart slot, so it must outlive a
//! single page load. Sessions are kept in `PostgreSQL` when a database is
//! configured and in process memory otherwise.
//!
//! The session layer writes the session back after the handler has run. A
//! backend failure at that point would turn a finished cart update into a
//! 500, so every store is wrapped in [`ResilientStore`], which logs backend
//! failures and lets the response through. The shopper keeps the cart they
//! saw for that request; it is simply not remembered.

use async_trait::async_trait;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "saree_cart_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer over any session store.
///
/// # Arguments
///
/// * `store` - Session store (`MemoryStore` or `PostgresStore`)
/// * `config` - Storefront configuration (for cookie security)
#[must_use]
pub fn create_session_layer<S: SessionStore>(
    store: S,
    config: &StorefrontConfig,
) -> SessionManagerLayer<ResilientStore<S>> {
    SessionManagerLayer::new(ResilientStore::new(store))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Session store that never fails a request.
///
/// Write and delete failures are logged and reported as success. A failed
/// load reads as an unknown session, so the request starts with an empty
/// cart.
#[derive(Debug, Clone)]
pub struct ResilientStore<S> {
    inner: S,
}

impl<S> ResilientStore<S> {
    /// Wrap a session store.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SessionStore> SessionStore for ResilientStore<S> {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        if let Err(e) = self.inner.create(record).await {
            tracing::error!("Failed to create session, cart will not persist: {e}");
        }
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        if let Err(e) = self.inner.save(record).await {
            tracing::error!("Failed to save session, cart will not persist: {e}");
        }
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        match self.inner.load(id).await {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::warn!("Failed to load session, starting a fresh one: {e}");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        if let Err(e) = self.inner.delete(id).await {
            tracing::error!("Failed to delete session: {e}");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;

    /// A backend that is always down.
    #[derive(Debug, Clone)]
    struct DownStore;

    #[async_trait]
    impl SessionStore for DownStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }

        async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }

        async fn delete(&self, _id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_save_failure_is_absorbed() {
        let session = Session::new(None, Arc::new(ResilientStore::new(DownStore)), None);
        session.insert("cartItems", "[]").await.unwrap();
        assert!(session.save().await.is_ok());
    }

    #[tokio::test]
    async fn test_load_failure_reads_as_empty_session() {
        let session = Session::new(
            Some(Id::default()),
            Arc::new(ResilientStore::new(DownStore)),
            None,
        );
        assert_eq!(session.get::<String>("cartItems").await.unwrap(), None);
        assert!(session.delete().await.is_ok());
    }

    #[tokio::test]
    async fn test_healthy_store_round_trips() {
        let store = Arc::new(ResilientStore::new(MemoryStore::default()));

        let session = Session::new(None, store.clone(), None);
        session.insert("cartItems", "[]").await.unwrap();
        session.save().await.unwrap();

        let reopened = Session::new(session.id(), store, None);
        assert_eq!(
            reopened.get::<String>("cartItems").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
