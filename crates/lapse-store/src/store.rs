//! Expiring store facade.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::backend::Backend;
use crate::envelope::Envelope;
use crate::error::Result;

/// Key-value store whose entries can expire.
///
/// Every value is wrapped in an [`Envelope`] before it reaches the backend.
/// Expiration is enforced lazily: reading an expired entry removes it and
/// reports it as absent. There is no background sweeper.
///
/// The store itself holds no state besides the backend handle; clones share
/// the backend.
pub struct ExpiringStore<B: Backend> {
    backend: Arc<B>,
}

impl<B: Backend> ExpiringStore<B> {
    /// Create a store over `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a store over a backend that is already shared.
    pub fn from_shared(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// `expire` of `None` or zero means the entry never expires.
    pub async fn set_item<T>(&self, key: &str, value: &T, expire: Option<Duration>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let envelope = Envelope::new(value, expire);
        let raw = serde_json::to_string(&envelope)?;
        self.backend.set_item(key, raw).await?;

        trace!(key = %key, expire_date = ?envelope.expire_date, "Set item");
        Ok(())
    }

    /// Merge `value` into the entry under `key`.
    ///
    /// With a nonzero `expire` the entry gets a fresh expiration date;
    /// otherwise it keeps the previous one. When no live entry exists this
    /// behaves like [`set_item`](Self::set_item).
    pub async fn merge_item<T>(&self, key: &str, value: &T, expire: Option<Duration>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let Some(previous) = self.get_envelope(key).await? else {
            debug!(key = %key, "No live entry to merge into, setting instead");
            return self.set_item(key, value, expire).await;
        };

        let envelope = match expire.filter(|d| !d.is_zero()) {
            Some(expire) => Envelope::new(value, Some(expire)),
            None => Envelope::with_expire_date(value, previous.expire_date),
        };
        let raw = serde_json::to_string(&envelope)?;
        self.backend.merge_item(key, raw).await?;

        trace!(key = %key, expire_date = ?envelope.expire_date, "Merged item");
        Ok(())
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is missing or its entry has expired.
    pub async fn get_item<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_envelope(key).await? {
            Some(envelope) => Ok(Some(serde_json::from_value(envelope.value)?)),
            None => Ok(None),
        }
    }

    /// Read the whole envelope stored under `key`.
    ///
    /// Follows the same expiration rules as [`get_item`](Self::get_item).
    pub async fn get_envelope(&self, key: &str) -> Result<Option<Envelope>> {
        let Some(raw) = self.backend.get_item(key).await? else {
            return Ok(None);
        };

        let envelope: Envelope = serde_json::from_str(&raw)?;
        if envelope.is_expired() {
            self.evict(key).await;
            return Ok(None);
        }

        Ok(Some(envelope))
    }

    /// Remove `key`.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        self.backend.remove_item(key).await
    }

    /// Remove every key from the backend.
    pub async fn clear(&self) -> Result<()> {
        self.backend.clear().await
    }

    /// List every key in the backend, expired or not.
    pub async fn get_all_keys(&self) -> Result<Vec<String>> {
        self.backend.get_all_keys().await
    }

    /// Remove an expired entry. Failures are logged, not returned: the read
    /// that found it expired still reports it as absent.
    async fn evict(&self, key: &str) {
        debug!(key = %key, "Entry expired, removing");
        if let Err(e) = self.backend.remove_item(key).await {
            warn!(key = %key, error = %e, "Failed to remove expired entry");
        }
    }
}

impl<B: Backend> Clone for ExpiringStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend + std::fmt::Debug> std::fmt::Debug for ExpiringStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("backend", &self.backend)
            .finish()
    }
}
