//! # Inventory Engine
//!
//! Validates and applies every change to the host/network inventory and answers
//! the listing queries the adapters expose.
//!
//! Data flows one way:
//!
//! 1. An adapter calls an [`InventoryRepository`] operation with parsed input.
//! 2. Fields are checked and normalized with [`narcotk_common::codec`].
//! 3. A parameterized [`Statement`] is built and parsed by the [`StatementGate`].
//! 4. Only a statement that passed the gate reaches the [`Storage`] port.
//! 5. Rows come back as records, and [`listing`] sorts them by padded key.
//!
//! The repository depends on the [`Storage`] trait only; [`SqliteStorage`] is the
//! adapter used by the binaries and tests.

pub mod error;
pub mod gate;
pub mod listing;
pub mod repository;
pub mod schema;
pub mod statement;
pub mod storage;

pub use error::{Entity, InventoryError, InventoryResult};
pub use gate::StatementGate;
pub use listing::{HostQuery, NetworkQuery};
pub use repository::InventoryRepository;
pub use statement::Statement;
pub use storage::{Row, Storage, StorageError, sqlite::SqliteStorage};
