//! # Storage Port
//!
//! The narrow interface the repository needs from a relational engine: run a
//! statement, run a query, and bracket a sequence of them in a transaction.
//!
//! Implementations never see an unchecked statement; the repository gates every
//! statement before handing it over. [`sqlite::SqliteStorage`] is the adapter
//! shipped with the workspace.

use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

use crate::statement::Statement;

pub mod sqlite;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot open database {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },
    /// The engine refused a write because it would break a uniqueness rule.
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("row has {found} columns, expected {expected}")]
    Decode { expected: usize, found: usize },
    #[error("storage engine failure: {0}")]
    Engine(#[source] Box<dyn Error + Send + Sync>),
}

/// One result row, every column rendered as text (`NULL` as empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Takes the columns out, failing unless the row has exactly `N` of them.
    pub fn into_array<const N: usize>(self) -> Result<[String; N], StorageError> {
        self.0.try_into().map_err(|columns: Vec<String>| StorageError::Decode {
            expected: N,
            found: columns.len(),
        })
    }
}

pub trait Storage {
    /// Runs a write or definition statement, returning the number of changed rows.
    fn execute(&mut self, statement: &Statement) -> Result<usize, StorageError>;

    /// Runs a query and collects its rows.
    fn query(&mut self, statement: &Statement) -> Result<Vec<Row>, StorageError>;

    /// Starts a transaction that holds the write lock until commit or rollback.
    fn begin(&mut self) -> Result<(), StorageError>;

    fn commit(&mut self) -> Result<(), StorageError>;

    fn rollback(&mut self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_shape_is_checked() {
        let row = Row::new(vec!["10.0.0".into(), "10.0.0.0/24".into()]);
        assert!(matches!(
            row.clone().into_array::<3>(),
            Err(StorageError::Decode { expected: 3, found: 2 })
        ));
        let [network, cidr] = row.into_array().unwrap();
        assert_eq!((network.as_str(), cidr.as_str()), ("10.0.0", "10.0.0.0/24"));
    }
}
