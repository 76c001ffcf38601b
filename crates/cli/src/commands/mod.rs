//! CLI command implementations.
//!
//! Every command opens the file-backed cart described by [`CliConfig`],
//! does its work, and writes human-readable output to the given writer.

pub mod cart;
pub mod show;

use pineapple_cart::CartStore;
use pineapple_cart::persistence::{CartPersistence, FileStore, StoreError};

use crate::config::CliConfig;

/// Result type shared by all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the configured cart store, hydrating it from disk.
///
/// # Errors
///
/// Returns [`StoreError`] if the store directory cannot be created.
pub fn open_store(config: &CliConfig) -> Result<CartStore<FileStore>, StoreError> {
    let mut files = FileStore::open(&config.store_dir)?;
    if let Some(limit) = config.quota_bytes {
        files = files.with_quota(limit);
    }
    let persistence = CartPersistence::with_key(files, config.storage_key.clone());
    Ok(CartStore::open(persistence))
}
