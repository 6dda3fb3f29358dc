//! Table definitions.
//!
//! `hosts.network` references `networks.network`; the repository enforces that
//! reference, the engine enforces uniqueness of `(fqdn, network)` with host names
//! compared case-insensitively. Databases created before the constraint existed
//! still work, the repository checks for duplicates itself.

use crate::statement::Statement;

const CREATE_HOSTS: &str = "CREATE TABLE IF NOT EXISTS hosts (
    network text NOT NULL,
    ipv4 text DEFAULT '',
    ipv6 text DEFAULT '',
    fqdn text COLLATE NOCASE NOT NULL,
    short1 text DEFAULT '',
    short2 text DEFAULT '',
    short3 text DEFAULT '',
    short4 text DEFAULT '',
    mac text DEFAULT '',
    UNIQUE (fqdn, network))";

const CREATE_NETWORKS: &str = "CREATE TABLE IF NOT EXISTS networks (
    network text PRIMARY KEY,
    cidr text NOT NULL,
    description text NOT NULL DEFAULT '')";

/// Statements creating both tables. Safe to run against an initialized database.
pub fn create_tables() -> [Statement; 2] {
    [Statement::new(CREATE_HOSTS), Statement::new(CREATE_NETWORKS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StatementGate;

    #[test]
    fn definitions_pass_the_gate() {
        let gate = StatementGate::new();
        for statement in create_tables() {
            assert!(gate.validate(&statement).is_ok(), "{statement}");
        }
    }
}
