//! Expiring key-value storage over pluggable persistent backends.
//!
//! This crate wraps every stored value in an [`Envelope`] that records when it
//! was saved and when (if ever) it expires:
//! - Expiration is checked lazily on read; expired entries are removed
//! - Backends only ever see opaque strings
//! - Every operation returns a [`Result`], nothing panics across the API
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use lapse_store::{ExpiringStore, MemoryBackend};
//!
//! let store = ExpiringStore::new(MemoryBackend::new());
//! store.set_item("token", &"abc123", Some(Duration::from_secs(60))).await?;
//!
//! let token: Option<String> = store.get_item("token").await?;
//! ```

mod backend;
mod envelope;
mod error;
mod memory;
mod merge;
mod sqlite;
mod store;

pub use backend::Backend;
pub use envelope::{Envelope, expire_date_from};
pub use error::{Result, StoreError};
pub use memory::MemoryBackend;
pub use merge::{merge_json, merge_values};
pub use sqlite::SqliteBackend;
pub use store::ExpiringStore;
