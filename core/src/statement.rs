//! Parameterized statements and the builders for every statement the inventory
//! issues.
//!
//! Values are never spliced into the SQL text: each builder emits `?`
//! placeholders and binds the values alongside.

use std::fmt;

use narcotk_common::{Host, Network};

/// Column list of the `hosts` table, in row order.
pub const HOST_COLUMNS: &str = "network, ipv4, ipv6, fqdn, short1, short2, short3, short4, mac";
/// Column list of the `networks` table, in row order.
pub const NETWORK_COLUMNS: &str = "network, cidr, description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Binds the next positional `?` value.
    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)?;
        if !self.params.is_empty() {
            write!(f, " {:?}", self.params)?;
        }
        Ok(())
    }
}

pub fn select_network(id: &str) -> Statement {
    Statement::new(format!("SELECT {NETWORK_COLUMNS} FROM networks WHERE network = ?")).bind(id)
}

/// Host names compare without regard to ASCII case, as in DNS.
pub fn select_host(fqdn: &str, network: &str) -> Statement {
    Statement::new(format!(
        "SELECT {HOST_COLUMNS} FROM hosts WHERE fqdn = ? COLLATE NOCASE AND network = ?"
    ))
    .bind(fqdn)
    .bind(network)
}

pub fn host_names_in(network: &str) -> Statement {
    Statement::new("SELECT fqdn FROM hosts WHERE network = ?").bind(network)
}

pub fn insert_network(network: &Network) -> Statement {
    Statement::new(format!(
        "INSERT INTO networks ({NETWORK_COLUMNS}) VALUES (?, ?, ?)"
    ))
    .bind(&network.network)
    .bind(&network.cidr)
    .bind(&network.description)
}

pub fn update_network(old_id: &str, network: &Network) -> Statement {
    Statement::new("UPDATE networks SET network = ?, cidr = ?, description = ? WHERE network = ?")
        .bind(&network.network)
        .bind(&network.cidr)
        .bind(&network.description)
        .bind(old_id)
}

/// Points every host of `old_id` at `new_id`.
pub fn move_hosts(old_id: &str, new_id: &str) -> Statement {
    Statement::new("UPDATE hosts SET network = ? WHERE network = ?")
        .bind(new_id)
        .bind(old_id)
}

pub fn delete_network(id: &str) -> Statement {
    Statement::new("DELETE FROM networks WHERE network = ?").bind(id)
}

pub fn insert_host(host: &Host) -> Statement {
    Statement::new(format!(
        "INSERT INTO hosts ({HOST_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(&host.network)
    .bind(&host.ipv4)
    .bind(&host.ipv6)
    .bind(&host.fqdn)
    .bind(&host.short1)
    .bind(&host.short2)
    .bind(&host.short3)
    .bind(&host.short4)
    .bind(&host.mac)
}

pub fn update_host(fqdn: &str, network: &str, host: &Host) -> Statement {
    Statement::new(
        "UPDATE hosts SET network = ?, ipv4 = ?, ipv6 = ?, fqdn = ?, short1 = ?, short2 = ?, \
         short3 = ?, short4 = ?, mac = ? WHERE fqdn = ? COLLATE NOCASE AND network = ?",
    )
    .bind(&host.network)
    .bind(&host.ipv4)
    .bind(&host.ipv6)
    .bind(&host.fqdn)
    .bind(&host.short1)
    .bind(&host.short2)
    .bind(&host.short3)
    .bind(&host.short4)
    .bind(&host.mac)
    .bind(fqdn)
    .bind(network)
}

pub fn delete_host(fqdn: &str, network: &str) -> Statement {
    Statement::new("DELETE FROM hosts WHERE fqdn = ? COLLATE NOCASE AND network = ?")
        .bind(fqdn)
        .bind(network)
}
