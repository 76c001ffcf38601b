//! In-process key-value store.

use std::collections::HashMap;

use super::{KeyValueStore, StoreError};

/// A [`KeyValueStore`] held in memory.
///
/// With a quota, the combined size of all keys and values may not exceed the
/// limit, the way browser local storage caps an origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let attempted = self.used_bytes() - replaced + key.len() + value.len();
            if attempted > limit {
                return Err(StoreError::QuotaExceeded { limit, attempted });
            }
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("cart", "[1]").unwrap();

        let err = store.set("cart", "[1,2,3,4,5]").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                limit: 10,
                attempted: 15
            }
        ));
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let mut store = MemoryStore::with_quota(10);
        store.set("cart", "123456").unwrap();
        store.set("cart", "654321").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }
}
