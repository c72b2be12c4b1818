//! In-memory lock store.

use crate::error::LockResult;
use crate::store::LockStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use wopihost_protocol::FileId;

/// An in-memory lock store.
///
/// Suitable for single-instance deployments, unit tests, and
/// integration tests. Compare-and-swap holds the write lock across the
/// comparison and the mutation, which makes every read-modify-write
/// sequence linearizable per file id.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across request handlers.
#[derive(Debug, Default)]
pub struct InMemoryLockStore {
    entries: RwLock<HashMap<FileId, String>>,
}

impl InMemoryLockStore {
    /// Creates a new empty lock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of held locks.
    ///
    /// Useful for testing and diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no locks are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes all lock records.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl LockStore for InMemoryLockStore {
    fn get(&self, id: &FileId) -> LockResult<Option<String>> {
        Ok(self.entries.read().get(id).cloned())
    }

    fn compare_and_swap(
        &self,
        id: &FileId,
        expected: Option<&str>,
        replacement: Option<&str>,
    ) -> LockResult<bool> {
        let mut entries = self.entries.write();
        if entries.get(id).map(String::as_str) != expected {
            return Ok(false);
        }
        match replacement {
            Some(token) => {
                entries.insert(id.clone(), token.to_string());
            }
            None => {
                entries.remove(id);
            }
        }
        Ok(true)
    }

    fn remove(&self, id: &FileId) -> LockResult<()> {
        self.entries.write().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn file_id() -> FileId {
        FileId::new(Uuid::new_v4(), "content")
    }

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryLockStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(&file_id()).unwrap(), None);
    }

    #[test]
    fn cas_from_none_inserts() {
        let store = InMemoryLockStore::new();
        let id = file_id();

        assert!(store.compare_and_swap(&id, None, Some("t1")).unwrap());
        assert_eq!(store.get(&id).unwrap().as_deref(), Some("t1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn cas_with_stale_expectation_fails() {
        let store = InMemoryLockStore::new();
        let id = file_id();
        store.compare_and_swap(&id, None, Some("t1")).unwrap();

        assert!(!store.compare_and_swap(&id, None, Some("t2")).unwrap());
        assert!(!store.compare_and_swap(&id, Some("t2"), Some("t3")).unwrap());
        assert_eq!(store.get(&id).unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn cas_to_none_removes() {
        let store = InMemoryLockStore::new();
        let id = file_id();
        store.compare_and_swap(&id, None, Some("t1")).unwrap();

        assert!(store.compare_and_swap(&id, Some("t1"), None).unwrap());
        assert_eq!(store.get(&id).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn cas_replaces_token() {
        let store = InMemoryLockStore::new();
        let id = file_id();
        store.compare_and_swap(&id, None, Some("old")).unwrap();

        assert!(store.compare_and_swap(&id, Some("old"), Some("new")).unwrap());
        assert_eq!(store.get(&id).unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn entries_are_per_file() {
        let store = InMemoryLockStore::new();
        let a = file_id();
        let b = file_id();
        store.compare_and_swap(&a, None, Some("ta")).unwrap();
        store.compare_and_swap(&b, None, Some("tb")).unwrap();

        assert_eq!(store.get(&a).unwrap().as_deref(), Some("ta"));
        assert_eq!(store.get(&b).unwrap().as_deref(), Some("tb"));
    }

    #[test]
    fn remove_is_unconditional() {
        let store = InMemoryLockStore::new();
        let id = file_id();
        store.compare_and_swap(&id, None, Some("t1")).unwrap();
        store.remove(&id).unwrap();
        assert!(store.is_empty());

        // Removing an absent record is not an error.
        store.remove(&id).unwrap();
    }
}
