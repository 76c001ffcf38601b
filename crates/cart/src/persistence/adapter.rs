//! Cart persistence adapter.
//!
//! Stores the cart as a JSON array of line item records under a single key:
//!
//! ```json
//! [{"id":"A1","name":"Widget","unitPrice":9.99,"quantity":2,"imageUrl":"/a1.png"}]
//! ```
//!
//! Loading never fails. Whatever is found under the key is either a valid
//! cart or it is discarded in favour of an empty one, with the reason kept in
//! [`LoadStatus::Corrupt`].

use pineapple_cart_core::{CartError, CartState, LineItem};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{KeyValueStore, StoreError};

/// Key the storefront page has always used for its cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// A cart write that the store rejected.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write cart: {0}")]
    Store(#[from] StoreError),
}

/// Why persisted cart data was discarded.
#[derive(Debug, Error)]
pub enum CorruptState {
    /// The store could not be read at all.
    #[error("stored cart could not be read: {0}")]
    Unreadable(#[source] StoreError),

    /// The value is not JSON.
    #[error("stored cart is not valid JSON: {0}")]
    InvalidEncoding(#[source] serde_json::Error),

    /// The value is JSON but not a list of records.
    #[error("stored cart is a JSON {found}, expected an array")]
    NotAList { found: &'static str },

    /// A record is missing fields or has invalid values.
    #[error("stored cart record {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The records break a cart invariant (e.g. a repeated product ID).
    #[error("stored cart is inconsistent: {0}")]
    Inconsistent(#[source] CartError),
}

/// What [`CartPersistence::load`] found.
#[derive(Debug)]
pub enum LoadStatus {
    /// Nothing stored under the key.
    Missing,
    /// A valid cart with this many line items.
    Restored { items: usize },
    /// Stored data was unusable and has been replaced by an empty cart.
    Corrupt(CorruptState),
}

impl LoadStatus {
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// Result of loading: always a usable state, plus how it was obtained.
#[derive(Debug)]
pub struct Hydration {
    pub state: CartState,
    pub status: LoadStatus,
}

/// Encode a cart as its persisted JSON form.
///
/// # Errors
///
/// Returns an error if a price cannot be represented as a JSON number.
pub fn encode(state: &CartState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Decode the persisted JSON form of a cart.
///
/// # Errors
///
/// Returns [`CorruptState`] describing the first problem found.
pub fn decode(raw: &str) -> Result<CartState, CorruptState> {
    let value: Value = serde_json::from_str(raw).map_err(CorruptState::InvalidEncoding)?;

    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(CorruptState::NotAList {
                found: json_kind(&other),
            });
        }
    };

    let items = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<LineItem>(record)
                .map_err(|source| CorruptState::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    CartState::from_items(items).map_err(CorruptState::Inconsistent)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Saves and loads one cart under a fixed key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Use [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the cart, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if encoding fails or the store rejects
    /// the write. The previously stored value is left in place.
    pub fn save(&mut self, state: &CartState) -> Result<(), PersistenceError> {
        let encoded = encode(state)?;
        self.store.set(&self.key, &encoded)?;
        debug!(key = %self.key, items = state.len(), bytes = encoded.len(), "Cart saved");
        Ok(())
    }

    /// Read the stored cart.
    ///
    /// Missing data gives an empty cart. Unreadable or malformed data also
    /// gives an empty cart, logged as a warning and reported in the status.
    #[must_use]
    pub fn load(&self) -> Hydration {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart");
                return Hydration {
                    state: CartState::new(),
                    status: LoadStatus::Missing,
                };
            }
            Err(e) => return self.discard(CorruptState::Unreadable(e)),
        };

        match decode(&raw) {
            Ok(state) => {
                info!(key = %self.key, items = state.len(), "Cart restored");
                let items = state.len();
                Hydration {
                    state,
                    status: LoadStatus::Restored { items },
                }
            }
            Err(e) => self.discard(e),
        }
    }

    /// The stored value exactly as written, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        self.store.get(&self.key)
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Store`] if the store cannot be written.
    pub fn clear_storage(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }

    fn discard(&self, reason: CorruptState) -> Hydration {
        warn!(key = %self.key, error = %reason, "Discarding corrupt cart data");
        Hydration {
            state: CartState::new(),
            status: LoadStatus::Corrupt(reason),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pineapple_cart_core::{ProductId, UnitPrice};
    use rust_decimal::Decimal;

    use super::*;
    use crate::persistence::MemoryStore;

    fn sample_state() -> CartState {
        let mut state = CartState::new();
        for (id, cents) in [("B1", 500), ("A1", 999), ("A1", 999), ("C1", 250)] {
            state
                .add_one(LineItem::new(
                    ProductId::parse(id).unwrap(),
                    format!("Product {id}"),
                    UnitPrice::new(Decimal::new(cents, 2)).unwrap(),
                    format!("/{id}.png"),
                ))
                .unwrap();
        }
        state
    }

    fn persistence_with(raw: &str) -> CartPersistence<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, raw).unwrap();
        CartPersistence::new(store)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let persistence = CartPersistence::new(MemoryStore::new());
        let hydration = persistence.load();
        assert!(hydration.state.is_empty());
        assert!(matches!(hydration.status, LoadStatus::Missing));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let state = sample_state();
        let mut persistence = CartPersistence::new(MemoryStore::new());
        persistence.save(&state).unwrap();

        let hydration = persistence.load();
        assert!(matches!(hydration.status, LoadStatus::Restored { items: 3 }));
        assert_eq!(hydration.state, state);
        assert_eq!(
            hydration
                .state
                .ids()
                .map(ProductId::as_str)
                .collect::<Vec<_>>(),
            vec!["B1", "A1", "C1"]
        );
    }

    #[test]
    fn test_load_invalid_json_is_corrupt() {
        let hydration = persistence_with("{not valid json").load();
        assert!(hydration.state.is_empty());
        assert!(matches!(
            hydration.status,
            LoadStatus::Corrupt(CorruptState::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_load_non_array_is_corrupt() {
        for (raw, kind) in [
            ("null", "null"),
            ("{}", "object"),
            ("42", "number"),
            ("\"cart\"", "string"),
        ] {
            let hydration = persistence_with(raw).load();
            assert!(hydration.state.is_empty());
            match hydration.status {
                LoadStatus::Corrupt(CorruptState::NotAList { found }) => assert_eq!(found, kind),
                other => panic!("expected NotAList for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_bad_record_is_corrupt() {
        let raw = r#"[
            {"id":"A1","name":"Widget","unitPrice":9.99,"quantity":1,"imageUrl":"/a1.png"},
            {"id":"B1","name":"Gadget","quantity":1,"imageUrl":"/b1.png"}
        ]"#;
        let hydration = persistence_with(raw).load();
        assert!(hydration.state.is_empty());
        assert!(matches!(
            hydration.status,
            LoadStatus::Corrupt(CorruptState::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn test_load_zero_quantity_is_corrupt() {
        let raw = r#"[{"id":"A1","name":"Widget","unitPrice":9.99,"quantity":0,"imageUrl":""}]"#;
        assert!(persistence_with(raw).load().status.is_corrupt());
    }

    #[test]
    fn test_load_duplicate_ids_is_corrupt() {
        let raw = r#"[
            {"id":"A1","name":"Widget","unitPrice":1,"quantity":1,"imageUrl":""},
            {"id":"A1","name":"Widget","unitPrice":1,"quantity":2,"imageUrl":""}
        ]"#;
        let hydration = persistence_with(raw).load();
        assert!(matches!(
            hydration.status,
            LoadStatus::Corrupt(CorruptState::Inconsistent(
                CartError::DuplicateProductId { .. }
            ))
        ));
    }

    #[test]
    fn test_load_legacy_records() {
        let raw = r#"[{"id":"A1","name":"Widget","price":9.99,"quantity":2,"imageUrl":"/a1.png"}]"#;
        let hydration = persistence_with(raw).load();
        assert_eq!(hydration.state.total(), Decimal::new(1998, 2));
    }

    #[test]
    fn test_empty_array_is_restored_not_corrupt() {
        let hydration = persistence_with("[]").load();
        assert!(matches!(hydration.status, LoadStatus::Restored { items: 0 }));
    }

    #[test]
    fn test_save_failure_keeps_previous_value() {
        let mut persistence = CartPersistence::new(MemoryStore::with_quota(8));
        persistence.save(&CartState::new()).unwrap();

        let err = persistence.save(&sample_state()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Store(StoreError::QuotaExceeded { .. })
        ));
        assert_eq!(persistence.raw().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_custom_key_and_clear_storage() {
        let mut persistence = CartPersistence::with_key(MemoryStore::new(), "np_cart");
        persistence.save(&sample_state()).unwrap();
        assert!(persistence.store().get("np_cart").unwrap().is_some());
        assert!(persistence.store().get(DEFAULT_STORAGE_KEY).unwrap().is_none());

        persistence.clear_storage().unwrap();
        assert!(matches!(persistence.load().status, LoadStatus::Missing));
    }
}
