//! Failure kinds reported by inventory operations.
//!
//! Every variant is returned to the caller; nothing is only logged. Adapters map
//! them to exit statuses (CLI) or response codes (HTTP).

use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Host,
    Network,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Host => write!(f, "host"),
            Entity::Network => write!(f, "network"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InventoryError {
    /// A field failed its format rule. Nothing was written.
    #[error("{field} address is not valid: {value}")]
    InvalidAddress { field: &'static str, value: String },

    /// A generated or caller-supplied statement failed the syntax gate.
    #[error("statement rejected ({reason}): {statement}")]
    StatementRejected { statement: String, reason: String },

    #[error("{entity} does not exist: {key}")]
    NotFound { entity: Entity, key: String },

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: Entity, key: String },

    #[error("network does not exist: {0}")]
    UnknownNetwork(String),

    /// More than one stored row answers to an identity that should be unique.
    #[error("{count} {entity} records match {key}")]
    AmbiguousMatch {
        entity: Entity,
        key: String,
        count: usize,
    },

    #[error("network {network} still has {hosts} host(s)")]
    NetworkInUse { network: String, hosts: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl InventoryError {
    pub(crate) fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn already_exists(entity: Entity, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }
}

/// `fqdn / network`, the way host identities are printed.
pub(crate) fn host_key(fqdn: &str, network: &str) -> String {
    format!("{fqdn} / {network}")
}
