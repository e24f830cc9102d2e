//! Session-backed slot storage.
//!
//! Each shopper's slots live in their tower-sessions session, which follows
//! them across page loads via the session cookie. Values are stored as JSON
//! strings so the slot holds exactly the text the cart store wrote.

use tower_sessions::Session;

use super::storage::{SlotStorage, StorageError};

/// Slot storage scoped to one shopper's session.
#[derive(Debug, Clone)]
pub struct SessionSlots {
    session: Session,
}

impl SessionSlots {
    /// Wrap the request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl SlotStorage for SessionSlots {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.session.remove_value(key).await?;
        Ok(())
    }
}
