//! Durable key-value byte store.
//!
//! # Responsibility
//! - Store opaque byte values under string keys.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `put` replaces the whole value in a single statement; readers never see
//!   a partially written value.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of the underlying byte store.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Backend refused the operation for a non-SQLite reason.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
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

/// Byte store contract used by the snapshot repository.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()>;
}

impl<R: KvRepository + ?Sized> KvRepository for &R {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        (**self).put(key, value)
    }
}

/// SQLite-backed key-value store over the `kv_entries` table.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryKvRepository {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvRepository for InMemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryKvRepository, KvRepository, SqliteKvRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_put_replaces_previous_value() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let repo = SqliteKvRepository::new(&conn);

        assert_eq!(repo.get("k").expect("get missing key"), None);
        repo.put("k", b"first").expect("insert");
        repo.put("k", b"second").expect("upsert");
        let stored = repo.get("k").expect("get replaced key");
        assert_eq!(stored.as_deref(), Some(&b"second"[..]));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .expect("count kv rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn in_memory_keys_are_independent() {
        let repo = InMemoryKvRepository::new();
        repo.put("a", b"1").unwrap();
        repo.put("b", b"2").unwrap();
        assert_eq!(repo.get("a").unwrap().as_deref(), Some(&b"1"[..]));
        assert_eq!(repo.get("c").unwrap(), None);
    }
}
