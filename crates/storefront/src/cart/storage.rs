//! Persisted slot storage.
//!
//! A slot is a named text value scoped to one shopper. The cart store keeps
//! its serialized items in a single slot and reaches it only through
//! [`SlotStorage`], so the backend can be the shopper's session in
//! production and an in-memory map in tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors raised by a slot backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused access (disabled, over quota, or broken).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The session layer failed to read or write the value.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// A key-value backend for persisted slots.
pub trait SlotStorage: Send + Sync {
    /// Read a slot. Returns `None` if the slot is absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Write a slot, replacing any existing value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete a slot. Deleting an absent slot succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// In-memory slot storage.
///
/// Clones share the same slots, so a clone handed to a fresh store sees what
/// the previous store persisted. Reads and writes can be switched off to
/// simulate storage that the shopper's environment has disabled.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    inner: Arc<MemorySlotsInner>,
}

#[derive(Debug, Default)]
struct MemorySlotsInner {
    slots: Mutex<HashMap<String, String>>,
    reads_disabled: AtomicBool,
    writes_disabled: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySlots {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that rejects every read and write.
    #[must_use]
    pub fn disabled() -> Self {
        let slots = Self::new();
        slots.set_reads_enabled(false);
        slots.set_writes_enabled(false);
        slots
    }

    /// Enable or disable reads.
    pub fn set_reads_enabled(&self, enabled: bool) {
        self.inner.reads_disabled.store(!enabled, Ordering::SeqCst);
    }

    /// Enable or disable writes and removals.
    pub fn set_writes_enabled(&self, enabled: bool) {
        self.inner.writes_disabled.store(!enabled, Ordering::SeqCst);
    }

    /// Write a slot directly, bypassing the enabled flags.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.inner.slots.lock() {
            slots.insert(key.to_owned(), value.to_owned());
        }
    }

    /// Read a slot directly, bypassing the enabled flags.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner
            .slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(key).cloned())
    }

    /// Number of successful writes and removals so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool, operation: &str) -> Result<(), StorageError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("{operation} disabled")));
        }
        Ok(())
    }

    fn with_slots<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, StorageError> {
        let mut slots = self
            .inner
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("slot map poisoned".to_string()))?;
        Ok(f(&mut slots))
    }
}

impl SlotStorage for MemorySlots {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check(&self.inner.reads_disabled, "reads")?;
        self.with_slots(|slots| slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.check(&self.inner.writes_disabled, "writes")?;
        self.with_slots(|slots| {
            slots.insert(key.to_owned(), value);
        })?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(&self.inner.writes_disabled, "writes")?;
        self.with_slots(|slots| {
            slots.remove(key);
        })?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let slots = MemorySlots::new();
        assert_eq!(slots.get("cartItems").await.unwrap(), None);

        slots.set("cartItems", "[]".to_string()).await.unwrap();
        assert_eq!(slots.get("cartItems").await.unwrap().as_deref(), Some("[]"));

        slots.remove("cartItems").await.unwrap();
        assert_eq!(slots.get("cartItems").await.unwrap(), None);

        // Removing again is fine
        slots.remove("cartItems").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let slots = MemorySlots::new();
        let other = slots.clone();
        slots.set("k", "v".to_string()).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_disabled_storage_rejects_access() {
        let slots = MemorySlots::disabled();
        assert!(matches!(
            slots.get("k").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(slots.set("k", "v".to_string()).await.is_err());
        assert!(slots.remove("k").await.is_err());
    }

    #[tokio::test]
    async fn test_write_failure_leaves_existing_value() {
        let slots = MemorySlots::new();
        slots.seed("k", "old");
        slots.set_writes_enabled(false);

        assert!(slots.set("k", "new".to_string()).await.is_err());
        assert_eq!(slots.get("k").await.unwrap().as_deref(), Some("old"));
        assert_eq!(slots.peek("k").as_deref(), Some("old"));
    }
}
