//! SQLite backend.
//!
//! Stores every key in a single `kv` table. Calls run on tokio's blocking
//! pool so the async caller never blocks on disk I/O.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, trace};

use crate::backend::Backend;
use crate::error::{Result, StoreError};
use crate::merge::merge_json;

/// Current schema version, stored in `PRAGMA user_version`.
const SCHEMA_VERSION: i32 = 1;

/// Backend persisting entries to a SQLite database.
///
/// Clones share the same connection.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteBackend {
    /// Open or create a database at `path`.
    ///
    /// Creates parent directories and the schema if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        initialize(&conn)?;

        debug!(path = %path.display(), "Opened SQLite store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Path of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            f(&mut conn)
        })
        .await?
    }
}

/// Create the schema on a fresh database and reject newer ones.
fn initialize(conn: &Connection) -> Result<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version > SCHEMA_VERSION {
        return Err(StoreError::Backend(format!(
            "database schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }

    if version < SCHEMA_VERSION {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!(from = version, to = SCHEMA_VERSION, "Migrated store schema");
    }

    Ok(())
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let value: Option<String> = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
        .await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            upsert(conn, &key, &value)?;
            trace!(key = %key, "Stored item");
            Ok(())
        })
        .await
    }

    async fn merge_item(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let existing: Option<String> = tx
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()?;

            let merged = match existing {
                Some(existing) => merge_json(&existing, &value),
                None => value,
            };
            upsert(&tx, &key, &merged)?;
            tx.commit()?;

            trace!(key = %key, "Merged item");
            Ok(())
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM kv", [])?;
            debug!(removed = removed, "Cleared store");
            Ok(())
        })
        .await
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(keys)
        })
        .await
    }
}
