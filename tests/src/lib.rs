//! End-to-end scenarios across the inventory crates.

mod scenarios;
