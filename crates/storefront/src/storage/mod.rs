//! Local key-value storage for the persisted cart.
//!
//! The cart survives restarts by being written to a small key-value store that
//! plays the role of browser-local storage: one named entry per key, string
//! values, no transactions.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, optionally with a byte quota. Used in
//!   tests and as the fallback when the file store cannot be opened.
//! - [`FileStore`] - A single JSON object on disk, rewritten atomically.
//!
//! [`CartStorage`] is the adapter the cart engine talks to. It never returns
//! errors: failed writes are logged and corrupt snapshots read as an empty cart.

mod cart;
mod file;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use thiserror::Error;

pub use cart::CartStorage;
pub use file::FileStore;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store.
///
/// Implementations must be safe to share between request handlers.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects or fails the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails the write.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Open the file store at `path`, falling back to an in-memory store.
///
/// A cart that cannot be persisted still works for the current process; the
/// failure is logged instead of preventing startup.
#[must_use]
pub fn open_store(path: &Path) -> Arc<dyn KeyValueStore> {
    match FileStore::open(path) {
        Ok(store) => {
            tracing::info!(path = %path.display(), "Cart store opened");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cart store unavailable, cart will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

/// In-memory store for testing and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store that rejects writes once keys plus values
    /// would exceed `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            data: RwLock::default(),
            quota: Some(quota),
        }
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Unavailable(format!("lock error: {e}"))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if let Some(quota) = self.quota {
            let others: usize = data
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }

        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.remove(key);
        Ok(())
    }
}
