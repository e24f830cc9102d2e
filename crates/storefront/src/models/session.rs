//! Session-related types.
//!
//! Besides the cart slot, the session carries a one-shot flash notice that
//! the next rendered page displays and discards.

use tower_sessions::Session;

/// Session keys used by the storefront.
pub mod keys {
    /// Key for the one-shot notice shown on the next page.
    pub const FLASH: &str = "flash";
}

/// Store a notice for the next page render.
///
/// Failures are logged; a lost notice never fails the request.
pub async fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(keys::FLASH, message).await {
        tracing::warn!("Failed to store flash notice: {e}");
    }
}

/// Take the pending notice, if any, removing it from the session.
pub async fn take_flash(session: &Session) -> Option<String> {
    session
        .remove::<String>(keys::FLASH)
        .await
        .inspect_err(|e| tracing::warn!("Failed to read flash notice: {e}"))
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_one_shot() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(take_flash(&session).await, None);

        set_flash(&session, "Silk Saree has been added to your cart!").await;
        assert_eq!(
            take_flash(&session).await.as_deref(),
            Some("Silk Saree has been added to your cart!")
        );
        assert_eq!(take_flash(&session).await, None);
    }
}
