//! Directory-backed key-value store.
//!
//! Each key maps to one file named after the key. Writes land in a uniquely
//! named temporary file in the same directory and are then renamed over the
//! target, so a reader sees either the old value or the new one, never a
//! partial write. Concurrent writers to one key each rename their own file;
//! the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;

use super::{KeyValueStore, StoreError};

/// A [`KeyValueStore`] that keeps one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir, quota: None })
    }

    /// Reject any single value larger than `limit` bytes.
    #[must_use]
    pub const fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_owned(),
        source,
    }
}

/// Write `value` to a fresh temporary file in `dir`, then move it to `path`.
///
/// The temporary file is deleted if any step fails.
fn replace_atomically(dir: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = Builder::new().prefix(".np-cart-").tempfile_in(dir)?;
    file.write_all(value.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        if let Some(limit) = self.quota.filter(|&limit| value.len() > limit) {
            return Err(StoreError::QuotaExceeded {
                limit,
                attempted: value.len(),
            });
        }

        replace_atomically(&self.dir, &path, value).map_err(io_error(key))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}
