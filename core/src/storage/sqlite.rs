//! SQLite adapter for the [`Storage`] port, backed by `rusqlite`.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags, params_from_iter};
use tracing::debug;

use super::{Row, Storage, StorageError};
use crate::statement::Statement;

pub struct SqliteStorage {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStorage {
    /// Opens an existing database file. A missing file is an error, not a
    /// silently created empty database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path: &Path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::Open {
                path: path.to_path_buf(),
                reason: String::from("database file does not exist"),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| open_error(path, e))?;

        debug!("Opened database {}", path.display());
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Opens a database file, creating it (and its parent directories) if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path: &Path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| open_error(path, e))?;
        }

        let conn = Connection::open(path).map_err(|e| open_error(path, e))?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Creates a private in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| open_error(Path::new(":memory:"), e))?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for SqliteStorage {
    fn execute(&mut self, statement: &Statement) -> Result<usize, StorageError> {
        self.conn
            .execute(statement.sql(), params_from_iter(statement.params()))
            .map_err(engine_error)
    }

    fn query(&mut self, statement: &Statement) -> Result<Vec<Row>, StorageError> {
        let mut prepared = self.conn.prepare(statement.sql()).map_err(engine_error)?;
        let columns: usize = prepared.column_count();

        let rows = prepared
            .query_map(params_from_iter(statement.params()), |row| {
                (0..columns)
                    .map(|idx| row.get_ref(idx).map(as_text))
                    .collect::<rusqlite::Result<Vec<String>>>()
                    .map(Row::new)
            })
            .map_err(engine_error)?;

        rows.collect::<rusqlite::Result<Vec<Row>>>()
            .map_err(engine_error)
    }

    fn begin(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch("BEGIN IMMEDIATE").map_err(engine_error)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch("COMMIT").map_err(engine_error)
    }

    fn rollback(&mut self) -> Result<(), StorageError> {
        self.conn.execute_batch("ROLLBACK").map_err(engine_error)
    }
}

fn as_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn open_error(path: &Path, e: impl std::fmt::Display) -> StorageError {
    StorageError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn engine_error(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StorageError::Constraint(message.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => StorageError::Engine(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage
            .execute(&Statement::new("CREATE TABLE t (k TEXT PRIMARY KEY, v TEXT)"))
            .unwrap();
        storage
    }

    #[test]
    fn missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        assert!(matches!(SqliteStorage::open(&path), Err(StorageError::Open { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hosts.db");

        SqliteStorage::create(&path).unwrap();
        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.path(), path.as_path());
    }

    #[test]
    fn null_and_numbers_come_back_as_text() {
        let mut storage = scratch();
        storage
            .execute(&Statement::new("INSERT INTO t (k) VALUES (?)").bind("a"))
            .unwrap();

        let rows = storage
            .query(&Statement::new("SELECT k, v, 42 FROM t"))
            .unwrap();
        assert_eq!(rows, vec![Row::new(vec!["a".into(), String::new(), "42".into()])]);
    }

    #[test]
    fn duplicate_key_is_a_constraint_error() {
        let mut storage = scratch();
        let insert = Statement::new("INSERT INTO t (k, v) VALUES (?, ?)").bind("a").bind("1");

        storage.execute(&insert).unwrap();
        assert!(matches!(storage.execute(&insert), Err(StorageError::Constraint(_))));
    }

    #[test]
    fn rollback_discards_writes() {
        let mut storage = scratch();
        storage.begin().unwrap();
        storage
            .execute(&Statement::new("INSERT INTO t (k) VALUES (?)").bind("a"))
            .unwrap();
        storage.rollback().unwrap();

        let rows = storage.query(&Statement::new("SELECT k FROM t")).unwrap();
        assert!(rows.is_empty());
    }
}
