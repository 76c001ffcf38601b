//! Durable storage for cart state.
//!
//! Split in two layers:
//! - [`KeyValueStore`] - string key to string value storage (browser-style
//!   local storage). Backends know nothing about carts or JSON.
//! - [`CartPersistence`] - the adapter that encodes a [`CartState`] under one
//!   fixed key and recovers from anything unreadable found there.
//!
//! [`CartState`]: pineapple_cart_core::CartState

pub mod adapter;
pub mod file;
pub mod memory;

pub use adapter::{
    CartPersistence, CorruptState, DEFAULT_STORAGE_KEY, Hydration, LoadStatus, PersistenceError,
    decode, encode,
};
pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would exceed the store's size limit.
    #[error("storage quota exceeded: {attempted} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { limit: usize, attempted: usize },

    /// The key cannot be used with this backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// String key-value storage.
///
/// Implementations must make [`set`](Self::set) atomic: after a failed write
/// the previous value (or absence of one) is still what [`get`](Self::get)
/// returns.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write is rejected; the old value remains.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
