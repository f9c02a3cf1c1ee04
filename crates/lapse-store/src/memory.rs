//! In-memory backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::backend::Backend;
use crate::error::Result;
use crate::merge::merge_json;

/// Backend that keeps everything in a `HashMap`.
///
/// Clones share the same map, so a test can hold one handle while the store
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the backend holds no keys.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Read the raw stored string without going through the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.items.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn merge_item(&self, key: &str, value: String) -> Result<()> {
        let mut items = self.items.write();
        let merged = match items.get(key) {
            Some(existing) => merge_json(existing, &value),
            None => value,
        };
        items.insert(key.to_string(), merged);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.items.write().clear();
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.items.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1".to_string()).await.unwrap();

        assert_eq!(backend.get_item("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(backend.len(), 1);

        backend.remove_item("a").await.unwrap();
        assert_eq!(backend.get_item("a").await.unwrap(), None);

        // Removing twice is fine
        backend.remove_item("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_merge_into_missing_key_sets() {
        let backend = MemoryBackend::new();
        backend
            .merge_item("a", r#"{"x":1}"#.to_string())
            .await
            .unwrap();

        assert_eq!(backend.raw("a"), Some(r#"{"x":1}"#.to_string()));
    }

    #[tokio::test]
    async fn test_merge_objects() {
        let backend = MemoryBackend::new();
        backend
            .set_item("a", r#"{"x":1,"y":{"z":1}}"#.to_string())
            .await
            .unwrap();
        backend
            .merge_item("a", r#"{"y":{"w":2}}"#.to_string())
            .await
            .unwrap();

        let merged: serde_json::Value =
            serde_json::from_str(&backend.raw("a").unwrap()).unwrap();
        assert_eq!(merged, serde_json::json!({"x": 1, "y": {"z": 1, "w": 2}}));
    }

    #[tokio::test]
    async fn test_keys_sorted_and_clear() {
        let backend = MemoryBackend::new();
        for key in ["c", "a", "b"] {
            backend.set_item(key, String::new()).await.unwrap();
        }

        assert_eq!(backend.get_all_keys().await.unwrap(), vec!["a", "b", "c"]);

        backend.clear().await.unwrap();
        assert!(backend.is_empty());
        assert!(backend.get_all_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let backend = MemoryBackend::new();
        let other = backend.clone();
        other.set_item("shared", "v".to_string()).await.unwrap();

        assert_eq!(backend.raw("shared"), Some("v".to_string()));
    }
}
