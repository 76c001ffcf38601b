//! Integration tests for the Naked Pineapple cart engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pineapple-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end store behaviour across add/remove/change
//! - `persistence_recovery` - File-backed storage, reloads and corrupt data
//! - `button_state` - Add-to-cart button state kept in step with the cart
//!
//! Tests that touch the filesystem get their own [`TempCartDir`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use pineapple_cart::CartStore;
use pineapple_cart::persistence::{CartPersistence, FileStore, KeyValueStore, MemoryStore};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A scratch directory for file-backed carts, deleted on drop.
#[derive(Debug)]
pub struct TempCartDir {
    dir: TempDir,
}

impl TempCartDir {
    /// Create a fresh, uniquely named directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("np-cart-it-")
            .tempdir()
            .expect("create temp cart dir");
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a file store rooted in this directory.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::open(self.path()).expect("open file store")
    }

    /// Open a cart store on this directory, as a new page load would.
    #[must_use]
    pub fn open_cart(&self) -> CartStore<FileStore> {
        CartStore::open(CartPersistence::new(self.file_store()))
    }
}

impl Default for TempCartDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A cart store backed by an empty in-memory store.
#[must_use]
pub fn memory_cart() -> CartStore<MemoryStore> {
    CartStore::open(CartPersistence::new(MemoryStore::new()))
}

/// A cart store whose backing store already holds `raw` under the cart key.
///
/// # Panics
///
/// Panics if the raw value cannot be written.
#[must_use]
pub fn memory_cart_with(raw: &str) -> CartStore<MemoryStore> {
    let mut store = MemoryStore::new();
    store
        .set(pineapple_cart::persistence::DEFAULT_STORAGE_KEY, raw)
        .expect("seed memory store");
    CartStore::open(CartPersistence::new(store))
}

/// A price given in cents.
#[must_use]
pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
