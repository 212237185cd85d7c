//! In-memory implementations of the storage ports.
//!
//! Used by tests and by sessions that should not touch disk. Clones share
//! the same underlying state, so a test can keep a handle and inspect what
//! the code under test wrote.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::CoreError;
use crate::models::{CartLine, Credentials};
use crate::traits::{CartPersistence, CredentialStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock only means another test thread panicked mid-write;
    // the data is still a plain value.
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ============================================================================
// Credentials
// ============================================================================

/// Credential store backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<Mutex<Option<Credentials>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(credentials))),
        }
    }

    /// Returns the current contents.
    pub fn snapshot(&self) -> Option<Credentials> {
        lock(&self.inner).clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CoreError> {
        Ok(lock(&self.inner).clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CoreError> {
        *lock(&self.inner) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *lock(&self.inner) = None;
        Ok(())
    }
}

// ============================================================================
// Cart
// ============================================================================

/// Cart persistence backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartPersistence {
    inner: Arc<Mutex<Option<Vec<CartLine>>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryCartPersistence {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding previously persisted lines.
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(lines))),
            saves: Arc::default(),
        }
    }

    /// Returns the last persisted lines.
    pub fn persisted(&self) -> Option<Vec<CartLine>> {
        lock(&self.inner).clone()
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

impl CartPersistence for MemoryCartPersistence {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CoreError> {
        Ok(lock(&self.inner).clone())
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CoreError> {
        *lock(&self.inner) = Some(lines.to_vec());
        *lock(&self.saves) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_access_token_keeps_refresh_token() {
        let store = MemoryCredentialStore::with_credentials(Credentials::new("old", "rt"));
        store.update_access_token("new").unwrap();
        assert_eq!(store.snapshot(), Some(Credentials::new("new", "rt")));
    }

    #[test]
    fn test_update_access_token_without_session() {
        let store = MemoryCredentialStore::new();
        assert!(matches!(
            store.update_access_token("new"),
            Err(CoreError::NoSession)
        ));
    }

    #[test]
    fn test_empty_refresh_token_is_absent() {
        let store = MemoryCredentialStore::with_credentials(Credentials::new("at", ""));
        assert_eq!(store.access_token().as_deref(), Some("at"));
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn test_empty_access_token_is_absent() {
        let store = MemoryCredentialStore::with_credentials(Credentials::new("", "rt"));
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token().as_deref(), Some("rt"));
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryCredentialStore::new();
        let handle = store.clone();
        store.save(&Credentials::new("a", "r")).unwrap();
        assert!(handle.snapshot().is_some());
        handle.clear().unwrap();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_cart_persistence_counts_saves() {
        let backend = MemoryCartPersistence::new();
        assert!(backend.load().unwrap().is_none());
        backend.save(&[]).unwrap();
        backend.save(&[]).unwrap();
        assert_eq!(backend.save_count(), 2);
        assert_eq!(backend.persisted(), Some(vec![]));
    }
}
