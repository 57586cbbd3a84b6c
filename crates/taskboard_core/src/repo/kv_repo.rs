//! Key-value repository contracts with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide the local key-value store that board snapshots live in.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` overwrites the whole value stored under a key.
//! - SQLite repositories only accept connections with migrations applied.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from key-value and snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Snapshot could not be serialized.
    Encode(serde_json::Error),
    /// Stored snapshot is not a valid task array.
    Decode {
        key: String,
        source: serde_json::Error,
    },
    /// Backend refused the operation (e.g. storage quota, read-only store).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key-value repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Decode { key, source } => {
                write!(f, "malformed snapshot under key `{key}`: {source}")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local string key-value store.
pub trait KeyValueRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<R: KeyValueRepository + ?Sized> KeyValueRepository for &R {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed key-value repository over the `kv_store` table.
pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    /// Creates a repository from a migrated connection.
    ///
    /// # Errors
    /// - Returns `UninitializedConnection` when the connection was not opened
    ///   through [`crate::db::open_db`] or [`crate::db::open_db_in_memory`].
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local key-value repository for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueRepository {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueRepository for MemoryKeyValueRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
