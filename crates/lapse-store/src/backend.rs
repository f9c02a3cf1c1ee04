//! Backend trait for pluggable persistent storage.
//!
//! The expiring store never touches storage directly. It talks to a
//! [`Backend`], which only ever sees string keys and opaque string values.
//!
//! # Example
//!
//! ```rust,ignore
//! use lapse_store::{Backend, ExpiringStore, MemoryBackend, SqliteBackend};
//!
//! // In-memory, for tests and short-lived processes
//! let store = ExpiringStore::new(MemoryBackend::new());
//!
//! // Or on disk
//! let store = ExpiringStore::new(SqliteBackend::open("store.db")?);
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for persistent key-value backends.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a store can be shared across
/// tasks.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Merge `value` into whatever is stored under `key`.
    ///
    /// Implementations should follow [`merge_json`](crate::merge_json):
    /// JSON objects merge recursively, anything else replaces.
    async fn merge_item(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every key.
    async fn clear(&self) -> Result<()>;

    /// List all stored keys.
    async fn get_all_keys(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn merge_item(&self, key: &str, value: String) -> Result<()> {
        (**self).merge_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        (**self).get_all_keys().await
    }
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Box<B> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn merge_item(&self, key: &str, value: String) -> Result<()> {
        (**self).merge_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        (**self).get_all_keys().await
    }
}
