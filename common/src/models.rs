//! # Inventory Records
//!
//! The two entity collections the inventory keeps, plus the partial updates that
//! can be applied to them.
//!
//! The padded sort keys (`PaddedIP`, `PaddedNetwork`) travel with the records so
//! the JSON output keeps its historic shape, but they are derived at read time
//! and never persisted.

mod host;
mod network;

pub use host::{Host, HostUpdate};
pub use network::{Network, NetworkUpdate};

/// Turns a caller-supplied value into an update field.
///
/// Adapters receive flags and query parameters as strings where "blank" has
/// always meant "keep the stored value"; this maps blank to `None`.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn merge(current: &str, update: &Option<String>) -> String {
    update.as_deref().unwrap_or(current).to_string()
}
