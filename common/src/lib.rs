//! # Shared inventory types
//!
//! Everything the storage layer and the adapters (CLI, HTTP) agree on:
//!
//! * **[`models`]**: `Host` and `Network` records plus their partial-update wrappers.
//! * **[`codec`]**: MAC normalization, address validation and the padded sort key.
//! * **[`ordering`]**: the one sort every listing goes through.
//! * **[`render`]**: plain column and JSON output of record lists.
//! * **[`config`]**: runtime configuration loaded from TOML.

pub mod codec;
pub mod config;
pub mod models;
pub mod ordering;
pub mod render;

pub use models::{Host, HostUpdate, Network, NetworkUpdate};
